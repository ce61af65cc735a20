//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coordinates of a post.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Public representation of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub body_text: String,
    pub category: String,
    pub location: Option<LocationDto>,
    pub reward: Option<f64>,
    pub status: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
}

/// Confirmation returned when an owner marks a post as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkFoundResponse {
    pub message: String,
    pub marked_by: Uuid,
    pub marked_at: String,
    pub post: PostResponse,
}
