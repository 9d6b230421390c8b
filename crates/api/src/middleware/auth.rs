//! Admin authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::crypto::verify_key_hash;

use crate::app::AppState;
use crate::error::ApiError;

/// Header carrying the admin API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Middleware for admin-only routes.
///
/// The `X-API-Key` header is hashed with SHA-256 and compared against
/// `security.admin_api_key_hash`. When no hash is configured every request
/// is refused.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let stored_hash = state.config.security.admin_api_key_hash.trim();
    if stored_hash.is_empty() {
        return ApiError::Forbidden("Admin access is not configured".into()).into_response();
    }

    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| verify_key_hash(k, stored_hash));

    match presented {
        Some(true) => next.run(req).await,
        Some(false) => {
            tracing::warn!(path = %req.uri().path(), "Rejected admin request with invalid API key");
            ApiError::Unauthorized("Invalid or missing API key".into()).into_response()
        }
        None => ApiError::Unauthorized("Invalid or missing API key".into()).into_response(),
    }
}
