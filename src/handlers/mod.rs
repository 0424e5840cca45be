mod admin;
mod health;
mod profile;
mod projects;

pub use admin::admin_users;
pub use health::{api_health, health, status};
pub use profile::profile;
pub use projects::{create_project, list_projects};

use axum::extract::OriginalUri;

use crate::error::ApiError;

// 404 envelope for unmatched /api paths
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("API endpoint {} not found", uri.path()))
}
