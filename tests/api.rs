use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use realartist_server::app;
use realartist_server::config::Config;
use realartist_server::state::AppState;

fn test_config() -> Config {
    Config {
        port: 0,
        env: "test".to_string(),
        jwt_secret: "test-secret".to_string(),
        database_url: String::new(),
        cors_origin: "*".to_string(),
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max_requests: 100,
        max_file_size: 10 * 1024 * 1024,
        allowed_file_types: vec!["image/jpeg".to_string()],
        static_dir: PathBuf::from("dist/public"),
    }
}

fn test_app() -> Router {
    app(Arc::new(AppState::new(test_config())))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_authed(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer test-token")
        .body(Body::empty())
        .unwrap()
}

fn post_project(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/projects")
        .header(header::AUTHORIZATION, "Bearer test-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = test_app();

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let response = send(&app, get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn status_reports_service_metadata() {
    let app = test_app();

    let response = send(&app, get("/api/status")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "operational");
    assert_eq!(body["data"]["service"], "RealArtist AI API");
}

#[tokio::test]
async fn profile_requires_bearer_token() {
    let app = test_app();

    let response = send(&app, get("/api/profile")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unauthorized");

    // any non-empty token passes the stub verifier
    let response = send(&app, get_authed("/api/profile")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["user"]["id"], "user_123");
    assert_eq!(body["data"]["user"]["role"], "user");
}

#[tokio::test]
async fn project_list_requires_auth_and_paginates() {
    let app = test_app();

    let response = send(&app, get("/api/projects")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, get_authed("/api/projects?page=1&limit=5")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["ownerId"], "user_123");
}

#[tokio::test]
async fn project_list_caps_limit_at_100() {
    let app = test_app();

    let response = send(&app, get_authed("/api/projects?limit=500")).await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["limit"], 100);
}

#[tokio::test]
async fn create_project_rejects_empty_name() {
    let app = test_app();

    let response = send(&app, post_project(json!({ "name": "   " }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation error");
}

#[tokio::test]
async fn create_project_rejects_overlong_name() {
    let app = test_app();

    let response = send(&app, post_project(json!({ "name": "x".repeat(101) }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_project_returns_trimmed_name() {
    let app = test_app();

    let response = send(
        &app,
        post_project(json!({ "name": "  My Track  ", "description": " demo " })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "My Track");
    assert_eq!(body["data"]["description"], "demo");
    assert_eq!(body["data"]["ownerId"], "user_123");
    assert_eq!(body["message"], "Project created successfully");
}

#[tokio::test]
async fn admin_route_rejects_non_admin_identity() {
    let app = test_app();

    // stub identity carries the "user" role
    let response = send(&app, get_authed("/api/admin/users")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn admin_route_requires_auth_first() {
    let app = test_app();

    let response = send(&app, get("/api/admin/users")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unmatched_api_path_returns_json_404() {
    let app = test_app();

    let response = send(&app, get("/api/does-not-exist")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("/api/does-not-exist")
    );
}

#[tokio::test]
async fn rate_limiter_rejects_after_max_requests() {
    let mut config = test_config();
    config.rate_limit_max_requests = 3;
    let app = app(Arc::new(AppState::new(config)));

    for _ in 0..3 {
        let response = send(&app, get("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Too many requests");
}

#[tokio::test]
async fn rate_limiter_resets_after_window() {
    let mut config = test_config();
    config.rate_limit_max_requests = 2;
    config.rate_limit_window = Duration::from_millis(50);
    let app = app(Arc::new(AppState::new(config)));

    for _ in 0..2 {
        assert_eq!(send(&app, get("/api/health")).await.status(), StatusCode::OK);
    }
    assert_eq!(
        send(&app, get("/api/health")).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(send(&app, get("/api/health")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_api_routes_fall_back_to_spa() {
    let static_dir = std::env::temp_dir().join(format!(
        "realartist-spa-test-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<html>spa</html>").unwrap();

    let mut config = test_config();
    config.static_dir = static_dir.clone();
    let app = app(Arc::new(AppState::new(config)));

    let response = send(&app, get("/dashboard/some/client/route")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>spa</html>");

    std::fs::remove_dir_all(&static_dir).ok();
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = test_app();

    let response = send(&app, get("/health")).await;
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}
