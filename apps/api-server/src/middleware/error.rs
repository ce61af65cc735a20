//! Error mapping - domain failures become RFC 7807 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use lostfound_core::DomainError;
use lostfound_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
///
/// Domain failures keep their own kind; the remaining variants cover
/// rejections that happen before a request reaches the domain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Domain(err) => err.kind(),
            AppError::BadRequest(_) => "validation",
            AppError::NotFound(_) => "not-found",
            AppError::PayloadTooLarge(_) => "payload-too-large",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(err) => match err {
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Validation(_) | DomainError::InvalidState(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                DomainError::Storage(_)
                | DomainError::Repository(_)
                | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let problem = match self {
            AppError::Domain(DomainError::NotFound { entity_type, id }) => {
                ErrorResponse::not_found(format!("{entity_type} with id {id} not found"))
            }
            AppError::Domain(DomainError::Validation(detail)) | AppError::BadRequest(detail) => {
                ErrorResponse::bad_request(detail)
            }
            AppError::Domain(DomainError::Forbidden(detail)) => ErrorResponse::forbidden(detail),
            AppError::Domain(DomainError::InvalidState(detail)) => {
                ErrorResponse::new(400, "Invalid State").with_detail(detail)
            }
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::PayloadTooLarge(detail) => {
                ErrorResponse::new(413, "Payload Too Large").with_detail(detail)
            }
            AppError::Domain(err) => {
                tracing::error!(kind = err.kind(), "Request failed: {}", err);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(problem.with_kind(self.kind()))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lostfound_core::error::RepoError;
    use lostfound_core::ports::BlobError;
    use uuid::Uuid;

    async fn problem(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::post_not_found(Uuid::new_v4()), StatusCode::NOT_FOUND),
            (DomainError::Validation("title is required".into()), StatusCode::BAD_REQUEST),
            (DomainError::Forbidden("nope".into()), StatusCode::FORBIDDEN),
            (DomainError::InvalidState("resolved".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::Repository(RepoError::Query("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }

    #[actix_web::test]
    async fn test_problem_type_follows_domain_kind() {
        let (status, body) = problem(DomainError::InvalidState("resolved".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "/problems/invalid-state");
        assert_eq!(body["detail"], "resolved");

        let (_, body) = problem(
            DomainError::Storage(BlobError::Io("disk on fire".into())).into(),
        )
        .await;
        assert_eq!(body["type"], "/problems/storage");

        let (status, body) = problem(AppError::PayloadTooLarge("too big".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["type"], "/problems/payload-too-large");
    }

    #[actix_web::test]
    async fn test_internal_details_are_not_exposed() {
        let err = AppError::from(DomainError::Repository(RepoError::Connection(
            "password=hunter2".into(),
        )));
        let (status, body) = problem(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "/problems/internal");
        assert!(body.get("detail").is_none());
    }
}
