//! Ownership guard for post mutations.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;

/// Whether `actor` may mutate `post`.
pub fn is_owner(actor: Uuid, post: &Post) -> bool {
    post.owner_id == actor
}

pub fn ensure_owner(actor: Uuid, post: &Post) -> Result<(), DomainError> {
    if is_owner(actor, post) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Only the post owner can modify this post".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostFields;

    fn post_owned_by(owner: Uuid) -> Post {
        let draft = PostFields {
            title: Some("Keys".to_string()),
            body_text: Some("three keys on a ring".to_string()),
            category: Some("found".to_string()),
            ..Default::default()
        }
        .into_new_post()
        .unwrap();
        Post::new(owner, draft, None)
    }

    #[test]
    fn test_owner_allowed() {
        let owner = Uuid::new_v4();
        let post = post_owned_by(owner);
        assert!(is_owner(owner, &post));
        assert!(ensure_owner(owner, &post).is_ok());
    }

    #[test]
    fn test_other_actor_forbidden() {
        let post = post_owned_by(Uuid::new_v4());
        let stranger = Uuid::new_v4();
        assert!(!is_owner(stranger, &post));
        assert!(matches!(
            ensure_owner(stranger, &post),
            Err(DomainError::Forbidden(_))
        ));
    }
}
