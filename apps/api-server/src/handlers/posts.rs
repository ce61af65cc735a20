//! Post endpoints.

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use lostfound_core::domain::Post;
use lostfound_shared::dto::{LocationDto, MarkFoundResponse, PostResponse};

use super::forms::PostForm;
use crate::middleware::{AppResult, Identity};
use crate::state::AppState;

/// GET /api/posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.search.list_active().await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /api/posts/{id}/
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.lifecycle.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/create/
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<PostForm>,
) -> AppResult<HttpResponse> {
    let input = form.into_input()?;
    tracing::debug!(username = %identity.username, has_image = input.image.is_some(), "Create post request");

    let post = state
        .lifecycle
        .create(identity.user_id, input.fields, input.image.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/posts/edit/{id}
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PostForm>,
) -> AppResult<HttpResponse> {
    let input = form.into_input()?;

    let post = state
        .lifecycle
        .update(
            identity.user_id,
            path.into_inner(),
            input.fields,
            input.image.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/delete/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .lifecycle
        .delete(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/found/{id}
pub async fn mark_found(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .lifecycle
        .mark_found(identity.user_id, path.into_inner())
        .await?;

    let marked_at = post.resolved_at.unwrap_or_else(Utc::now).to_rfc3339();

    Ok(HttpResponse::Ok().json(MarkFoundResponse {
        message: "Post marked as found".to_string(),
        marked_by: identity.user_id,
        marked_at,
        post: post_response(post),
    }))
}

pub(crate) fn post_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

pub(crate) fn post_response(post: Post) -> PostResponse {
    let image = post.image.map(|handle| handle.into_inner());

    PostResponse {
        id: post.id,
        owner_id: post.owner_id,
        title: post.title,
        body_text: post.body_text,
        category: post.category,
        location: post.location.map(|l| LocationDto {
            latitude: l.latitude,
            longitude: l.longitude,
        }),
        reward: post.reward,
        status: post.status.to_string(),
        image_url: image.as_ref().map(|handle| format!("/api/media/{handle}")),
        image,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        resolved_at: post.resolved_at.map(|at| at.to_rfc3339()),
    }
}
