use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::TimeDelta;
use serde_json::Value;
use uuid::Uuid;

use lostfound_core::domain::{Post, PostFields};
use lostfound_core::ports::TokenService;
use lostfound_infra::{JwtConfig, JwtTokenService};

use super::{configure_routes, upload_config};
use crate::state::AppState;

const BOUNDARY: &str = "lostfound-test-boundary";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-pixels";

macro_rules! init_app {
    ($harness:expr) => {
        init_app!($harness, 1024 * 1024)
    };
    ($harness:expr, $upload_limit:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($harness.state.clone()))
                .app_data(web::Data::new($harness.token_service()))
                .app_data(upload_config($upload_limit))
                .configure(configure_routes),
        )
        .await
    };
}

struct Harness {
    state: AppState,
    jwt: Arc<JwtTokenService>,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: AppState::in_memory(),
            jwt: Arc::new(JwtTokenService::new(JwtConfig::default())),
        }
    }

    fn token_service(&self) -> Arc<dyn TokenService> {
        self.jwt.clone()
    }

    fn bearer(&self, user: Uuid) -> (header::HeaderName, String) {
        let token = self
            .jwt
            .issue_token(user, "tester", TimeDelta::hours(1))
            .unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn seed(&self, owner: Uuid, title: &str, body: &str) -> Post {
        let fields = PostFields {
            title: Some(title.to_string()),
            body_text: Some(body.to_string()),
            category: Some("lost".to_string()),
            ..Default::default()
        };
        self.state.lifecycle.create(owner, fields, None).await.unwrap()
    }
}

fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"picture_name\"; filename=\"item.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_content_type() -> (header::HeaderName, String) {
    (
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

#[actix_web::test]
async fn test_list_posts_hides_resolved() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let wallet = harness.seed(owner, "Lost Wallet", "black leather").await;
    let keys = harness.seed(owner, "Lost Keys", "three keys on a ring").await;
    harness.state.lifecycle.mark_found(owner, keys.id).await.unwrap();

    let app = init_app!(harness);
    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], wallet.id.to_string());
    assert_eq!(posts[0]["status"], "active");
}

#[actix_web::test]
async fn test_get_post_by_id() {
    let harness = Harness::new();
    let post = harness.seed(Uuid::new_v4(), "Lost Wallet", "black leather").await;
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["type"], "/problems/not-found");
}

#[actix_web::test]
async fn test_malformed_post_id_is_a_problem_document() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/posts/not-a-uuid/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["type"], "/problems/not-found");
    assert_eq!(problem["status"], 404);
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let post = harness.seed(owner, "Lost Wallet", "black leather").await;
    let app = init_app!(harness);

    let token = harness
        .jwt
        .issue_token(owner, "tester", TimeDelta::hours(-2))
        .unwrap();
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/found/{}", post.id))
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["title"], "Token Expired");
}

#[actix_web::test]
async fn test_mutations_require_token() {
    let harness = Harness::new();
    let post = harness.seed(Uuid::new_v4(), "Lost Wallet", "black leather").await;
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/found/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/delete/{}", post.id))
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let post = harness.state.lifecycle.get(post.id).await.unwrap();
    assert!(post.is_active());
}

#[actix_web::test]
async fn test_mark_found_flow() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let post = harness.seed(owner, "Lost Wallet", "black leather").await;
    let app = init_app!(harness);
    let uri = format!("/api/posts/found/{}", post.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(harness.bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(harness.bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["marked_by"], owner.to_string());
    assert_eq!(body["post"]["status"], "resolved");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(harness.bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["type"], "/problems/invalid-state");
}

#[actix_web::test]
async fn test_delete_then_missing() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let post = harness.seed(owner, "Lost Wallet", "black leather").await;
    let app = init_app!(harness);
    let uri = format!("/api/posts/delete/{}", post.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(harness.bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(harness.bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_search_matches_resolved_posts() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let wallet = harness.seed(owner, "Lost Wallet", "black leather").await;
    harness.seed(owner, "Lost Umbrella", "blue").await;
    harness.state.lifecycle.mark_found(owner, wallet.id).await.unwrap();

    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/search/WALLET").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["status"], "resolved");

    let req = test::TestRequest::get().uri("/api/search/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Lost Umbrella");
}

#[actix_web::test]
async fn test_create_with_image_and_fetch_media() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let app = init_app!(harness);

    let body = multipart_body(
        &[
            ("title", "Lost Wallet"),
            ("details", "black leather"),
            ("type", "lost"),
            ("latitude", "13.7563"),
            ("longitude", "100.5018"),
        ],
        Some(PNG),
    );
    let req = test::TestRequest::post()
        .uri("/api/posts/create/")
        .insert_header(harness.bearer(owner))
        .insert_header(multipart_content_type())
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["owner_id"], owner.to_string());
    assert_eq!(post["body_text"], "black leather");
    assert_eq!(post["category"], "lost");
    assert_eq!(post["location"]["latitude"], 13.7563);

    let image_url = post["image_url"].as_str().unwrap().to_string();
    let req = test::TestRequest::get().uri(&image_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");

    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], PNG);
}

#[actix_web::test]
async fn test_create_rejects_missing_fields() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/posts/create/")
        .insert_header(harness.bearer(Uuid::new_v4()))
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[("title", "Lost Wallet")], Some(PNG)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(harness.state.search.list_active().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_oversized_upload_rejected() {
    let harness = Harness::new();
    let app = init_app!(harness, 512);

    let image = vec![0u8; 4096];
    let body = multipart_body(
        &[
            ("title", "Lost Wallet"),
            ("body_text", "black leather"),
            ("category", "lost"),
        ],
        Some(&image),
    );
    let req = test::TestRequest::post()
        .uri("/api/posts/create/")
        .insert_header(harness.bearer(Uuid::new_v4()))
        .insert_header(multipart_content_type())
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["type"], "/problems/payload-too-large");
    assert!(harness.state.search.list_active().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_edit_replaces_image() {
    let harness = Harness::new();
    let owner = Uuid::new_v4();
    let post = harness.seed(owner, "Lost Wallet", "black leather").await;
    let app = init_app!(harness);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/edit/{}", post.id))
        .insert_header(harness.bearer(owner))
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[("title", "Lost Brown Wallet")], Some(PNG)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Lost Brown Wallet");
    assert_eq!(body["body_text"], "black leather");
    assert!(body["image"].is_string());

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/edit/{}", post.id))
        .insert_header(harness.bearer(Uuid::new_v4()))
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[("title", "Mine now")], None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_health() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}
