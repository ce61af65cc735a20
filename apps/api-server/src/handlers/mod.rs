//! HTTP handlers and route configuration.

mod forms;
mod health;
mod media;
mod posts;
mod search;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::AppError;

pub use forms::upload_config;

/// Malformed path parameters (e.g. a non-UUID post id) name no resource.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Path rejected");
        AppError::NotFound(format!("No resource at {}", req.path())).into()
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config());
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/media/{handle}", web::get().to(media::get_media))
            .service(
                web::scope("/posts")
                    .route("/", web::get().to(posts::list_posts))
                    .route("/create/", web::post().to(posts::create_post))
                    .route("/edit/{id}", web::put().to(posts::edit_post))
                    .route("/delete/{id}", web::delete().to(posts::delete_post))
                    .route("/found/{id}", web::post().to(posts::mark_found))
                    .route("/{id}/", web::get().to(posts::get_post)),
            )
            .service(
                web::scope("/search")
                    .route("/", web::get().to(search::search_all))
                    .route("/{terms}", web::get().to(search::search_terms)),
            ),
    );
}
