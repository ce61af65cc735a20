//! Search endpoints.

use actix_web::{HttpResponse, web};

use super::posts::post_responses;
use crate::middleware::AppResult;
use crate::state::AppState;

/// GET /api/search/
///
/// No term: active posts only.
pub async fn search_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.search.search(None).await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /api/search/{terms}
///
/// Matches title or body, case-insensitively, regardless of status.
pub async fn search_terms(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let terms = path.into_inner();
    let posts = state.search.search(Some(&terms)).await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}
