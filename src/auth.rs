use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::models::{AuthUser, Role};
use crate::state::AppState;

/// Strategy for turning a bearer token into an identity. Swapping in a real
/// JWT verifier only means providing another implementation; call sites stay
/// untouched.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthUser, ApiError>;
}

/// Development stand-in: accepts any token and returns a fixed identity.
/// This is NOT real verification and must be replaced before exposing
/// protected data.
pub struct StubVerifier;

impl TokenVerifier for StubVerifier {
    fn verify(&self, _token: &str) -> Result<AuthUser, ApiError> {
        Ok(AuthUser {
            id: "user_123".to_string(),
            email: "user@example.com".to_string(),
            role: Role::User,
        })
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Middleware guarding protected routes. A missing token is a 401; a token
/// the verifier rejects is a 403. On success the identity rides along as a
/// request extension.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        return ApiError::Unauthorized("Access token required").into_response();
    };

    match state.verifier.verify(&token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(_) => ApiError::Forbidden("Invalid or expired token").into_response(),
    }
}

/// Role gate layered inside `authenticate`. No identity means the request
/// never went through authentication.
pub async fn require_role(allowed: &'static [Role], req: Request, next: Next) -> Response {
    match req.extensions().get::<AuthUser>() {
        None => ApiError::Unauthorized("Authentication required").into_response(),
        Some(user) if !allowed.contains(&user.role) => {
            ApiError::Forbidden("Insufficient permissions").into_response()
        }
        Some(_) => next.run(req).await,
    }
}
