//! Stored image retrieval.

use actix_web::{HttpResponse, http::header, web};

use lostfound_core::DomainError;
use lostfound_core::domain::BlobHandle;
use lostfound_core::ports::BlobError;

use crate::middleware::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/media/{handle}
pub async fn get_media(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let handle = BlobHandle::new(path.into_inner());

    let data = state.blobs.get(&handle).await.map_err(|e| match e {
        BlobError::NotFound(_) | BlobError::InvalidHandle(_) => {
            AppError::NotFound(format!("Image {handle} not found"))
        }
        other => DomainError::Storage(other).into(),
    })?;

    Ok(HttpResponse::Ok()
        .content_type(sniff_content_type(&data))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400, immutable"))
        .body(data))
}

/// Guess an image MIME type from its leading bytes.
fn sniff_content_type(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}
