use axum::{Extension, Json};
use serde::Serialize;

use crate::models::{ApiResponse, AuthUser};

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: AuthUser,
}

/// Returns the identity the auth middleware attached to this request.
pub async fn profile(Extension(user): Extension<AuthUser>) -> Json<ApiResponse<ProfileData>> {
    Json(ApiResponse::ok(ProfileData { user }))
}
