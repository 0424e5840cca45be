use axum::Json;
use serde::Serialize;

use crate::models::{ApiResponse, AuthUser};

#[derive(Debug, Serialize)]
pub struct AdminUsers {
    pub users: Vec<AuthUser>,
}

/// Admin-only user listing. Empty until user storage exists.
pub async fn admin_users() -> Json<ApiResponse<AdminUsers>> {
    Json(ApiResponse::with_message(
        AdminUsers { users: Vec::new() },
        "Admin endpoint - users list",
    ))
}
