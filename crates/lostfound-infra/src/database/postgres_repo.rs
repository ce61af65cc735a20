//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use lostfound_core::domain::{Post, PostStatus};
use lostfound_core::error::{DomainError, RepoError};
use lostfound_core::ports::{PostChange, PostCheck, PostMutation, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl PostgresPostRepository {
    /// Open a transaction and take a row lock (`SELECT ... FOR UPDATE`) on the post.
    async fn lock(&self, id: Uuid) -> Result<(DatabaseTransaction, Post), DomainError> {
        let txn = self.db.begin().await.map_err(repo_error)?;

        let model = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(repo_error)?;

        match model {
            Some(model) => Ok((txn, model.into())),
            None => {
                txn.rollback().await.map_err(repo_error)?;
                Err(DomainError::post_not_found(id))
            }
        }
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Status.eq(post::Status::from(status)))
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search_by_text(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = like_pattern(term);
        tracing::debug!(term, "Searching posts by text");

        let matches_column = |column: post::Column| {
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\'))
        };

        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(matches_column(post::Column::Title))
                    .add(matches_column(post::Column::BodyText)),
            )
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn modify(&self, id: Uuid, mutation: PostMutation) -> Result<PostChange, DomainError> {
        let (txn, before) = self.lock(id).await?;

        let mut after = before.clone();
        if let Err(e) = mutation(&mut after) {
            txn.rollback().await.map_err(repo_error)?;
            return Err(e);
        }

        let active_model: post::ActiveModel = after.clone().into();
        active_model.update(&txn).await.map_err(repo_error)?;
        txn.commit().await.map_err(repo_error)?;

        Ok(PostChange { before, after })
    }

    async fn remove(&self, id: Uuid, check: PostCheck) -> Result<Post, DomainError> {
        let (txn, post) = self.lock(id).await?;

        if let Err(e) = check(&post) {
            txn.rollback().await.map_err(repo_error)?;
            return Err(e);
        }

        PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(repo_error)?;
        txn.commit().await.map_err(repo_error)?;

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Wallet"), "%wallet%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
