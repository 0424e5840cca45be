use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

use crate::models::ApiResponse;

// liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "RealArtist AI API is running"
    }))
}

#[derive(Debug, Serialize)]
pub struct StatusData {
    service: &'static str,
    version: &'static str,
    status: &'static str,
}

// service metadata, no auth
pub async fn status() -> Json<ApiResponse<StatusData>> {
    Json(ApiResponse::ok(StatusData {
        service: "RealArtist AI API",
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    }))
}
