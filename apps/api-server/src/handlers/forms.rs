//! Multipart form input for post creation and editing.

use actix_multipart::MultipartError;
use actix_multipart::form::{MultipartForm, MultipartFormConfig, bytes::Bytes, text::Text};
use actix_web::error::PayloadError;
use actix_web::web;

use lostfound_core::domain::PostFields;

use crate::middleware::{AppError, AppResult};

/// Fields accepted by `POST /posts/create/` and `PUT /posts/edit/{id}`.
///
/// `details` and `type` are accepted as aliases of `body_text` and
/// `category`. Empty text values count as absent.
#[derive(MultipartForm)]
pub struct PostForm {
    pub title: Option<Text<String>>,
    pub body_text: Option<Text<String>>,
    pub details: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(rename = "type")]
    pub kind: Option<Text<String>>,
    pub latitude: Option<Text<String>>,
    pub longitude: Option<Text<String>>,
    pub reward: Option<Text<String>>,
    pub picture_name: Option<Bytes>,
}

/// A parsed form: the raw post fields plus the uploaded image, if any.
pub struct PostInput {
    pub fields: PostFields,
    pub image: Option<web::Bytes>,
}

impl PostForm {
    pub fn into_input(self) -> AppResult<PostInput> {
        let fields = PostFields {
            title: text(self.title),
            body_text: text(self.body_text).or_else(|| text(self.details)),
            category: text(self.category).or_else(|| text(self.kind)),
            latitude: number("latitude", text(self.latitude))?,
            longitude: number("longitude", text(self.longitude))?,
            reward: number("reward", text(self.reward))?,
        };

        // Browsers submit an empty part when no file was chosen.
        let image = self
            .picture_name
            .map(|file| file.data)
            .filter(|data| !data.is_empty());

        Ok(PostInput { fields, image })
    }
}

/// Upload limits for post forms. Oversized bodies are rejected with 413,
/// any other malformed form with 400.
pub fn upload_config(max_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_bytes)
        .memory_limit(max_bytes)
        .error_handler(move |err, _req| {
            let app_err = if matches!(err, MultipartError::Payload(PayloadError::Overflow)) {
                AppError::PayloadTooLarge(format!("Upload exceeds {max_bytes} bytes"))
            } else {
                AppError::BadRequest(err.to_string())
            };
            app_err.into()
        })
}

fn text(value: Option<Text<String>>) -> Option<String> {
    value.map(|t| t.0).filter(|v| !v.trim().is_empty())
}

fn number(field: &str, value: Option<String>) -> AppResult<Option<f64>> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| AppError::BadRequest(format!("{field} must be a number")))
        })
        .transpose()
}
