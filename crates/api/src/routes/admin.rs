//! Admin endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::AppWithDetails;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Look up an app by slug regardless of status.
///
/// GET /api/v1/admin/apps/:slug
///
/// Requires admin API key authentication.
pub async fn get_app(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AppWithDetails>, ApiError> {
    let details = state
        .catalog
        .get_app_by_slug_privileged(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("App '{}' not found", slug)))?;

    info!(slug = %slug, status = %details.app.status, "Admin app lookup");

    Ok(Json(details))
}
