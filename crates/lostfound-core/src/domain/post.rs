use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BlobHandle, Location};
use crate::error::DomainError;

const MAX_TITLE_CHARS: usize = 200;

/// Lifecycle state of a post. The only transition is `Active -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Active,
    Resolved,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PostStatus::Active),
            "resolved" => Ok(PostStatus::Resolved),
            other => Err(DomainError::Validation(format!("Unknown post status '{other}'"))),
        }
    }
}

/// Post entity - a lost or found item listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub body_text: String,
    pub category: String,
    pub location: Option<Location>,
    pub reward: Option<f64>,
    pub status: PostStatus,
    pub image: Option<BlobHandle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new active post owned by `owner_id`.
    pub fn new(owner_id: Uuid, draft: NewPost, image: Option<BlobHandle>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title,
            body_text: draft.body_text,
            category: draft.category,
            location: draft.location,
            reward: draft.reward,
            status: PostStatus::Active,
            image,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PostStatus::Active
    }

    /// Resolved posts are read-only.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::InvalidState(
                "This post is no longer active".to_string(),
            ))
        }
    }

    /// Apply a partial update. A `Some` image replaces the current handle;
    /// `None` leaves it untouched.
    pub fn apply(&mut self, patch: PostPatch, image: Option<BlobHandle>) -> Result<(), DomainError> {
        self.ensure_active()?;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body_text) = patch.body_text {
            self.body_text = body_text;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(reward) = patch.reward {
            self.reward = Some(reward);
        }
        if image.is_some() {
            self.image = image;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mark the item as found.
    pub fn resolve(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.status = PostStatus::Resolved;
        self.resolved_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// Case-insensitive containment of `term` in the title or body.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.body_text.to_lowercase().contains(&needle)
    }
}

/// Raw post fields as submitted by a client. Every field is optional here;
/// `into_new_post` and `into_patch` decide which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reward: Option<f64>,
}

/// Validated fields for a new post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub body_text: String,
    pub category: String,
    pub location: Option<Location>,
    pub reward: Option<f64>,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub category: Option<String>,
    pub location: Option<Location>,
    pub reward: Option<f64>,
}

impl PostFields {
    pub fn into_new_post(self) -> Result<NewPost, DomainError> {
        let location = Location::from_parts(self.latitude, self.longitude)?;
        let reward = validate_reward(self.reward)?;

        let title = required_text("title", self.title)?;
        check_title_length(&title)?;

        Ok(NewPost {
            title,
            body_text: required_text("body_text", self.body_text)?,
            category: required_text("category", self.category)?,
            location,
            reward,
        })
    }

    pub fn into_patch(self) -> Result<PostPatch, DomainError> {
        let location = Location::from_parts(self.latitude, self.longitude)?;
        let reward = validate_reward(self.reward)?;

        let title = self
            .title
            .map(|t| required_text("title", Some(t)))
            .transpose()?;
        if let Some(title) = &title {
            check_title_length(title)?;
        }

        Ok(PostPatch {
            title,
            body_text: self
                .body_text
                .map(|t| required_text("body_text", Some(t)))
                .transpose()?,
            category: self
                .category
                .map(|t| required_text("category", Some(t)))
                .transpose()?,
            location,
            reward,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::Validation(format!("{field} is required"))),
    }
}

fn check_title_length(title: &str) -> Result<(), DomainError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::Validation(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_reward(reward: Option<f64>) -> Result<Option<f64>, DomainError> {
    match reward {
        Some(r) if !r.is_finite() || r < 0.0 => Err(DomainError::Validation(
            "reward must be a non-negative number".to_string(),
        )),
        other => Ok(other),
    }
}
