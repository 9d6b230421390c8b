//! Download and page view beacons.

use axum::{extract::State, Json};
use domain::models::tracking::{TrackDownloadRequest, TrackPageViewRequest, TrackResponse};
use domain::models::Platform;
use domain::services::CatalogError;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ClientMeta};
use crate::middleware::metrics::{
    record_download_tracked, record_page_view_tracked, record_tracking_failure,
};

/// Record a download of one app version.
///
/// POST /api/download
///
/// Request body: `{"versionId": "<uuid>", "platform": "android|windows|zip"}`
pub async fn track_download(
    State(state): State<AppState>,
    ClientMeta(metadata): ClientMeta,
    ApiJson(request): ApiJson<TrackDownloadRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let platform: Platform = request.platform.parse().map_err(|e: String| {
        record_tracking_failure("download", "invalid_argument");
        ApiError::Validation(e)
    })?;

    let download = state
        .catalog
        .track_download(request.version_id, platform, metadata)
        .await
        .map_err(|e| tracking_failure("download", e))?;

    record_download_tracked(platform.as_str());
    info!(
        download_id = %download.id,
        version_id = %download.version_id,
        platform = %platform,
        "Download tracked"
    );

    Ok(Json(TrackResponse {
        success: true,
        id: Some(download.id),
    }))
}

/// Record a page view.
///
/// POST /api/pageview
///
/// Request body: `{"path": "/apps/<slug>", "appId": "<uuid>"}`, `appId`
/// optional.
pub async fn track_page_view(
    State(state): State<AppState>,
    ClientMeta(metadata): ClientMeta,
    ApiJson(request): ApiJson<TrackPageViewRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    request.validate().map_err(|e| {
        record_tracking_failure("page_view", "invalid_argument");
        ApiError::from(e)
    })?;

    let view = state
        .catalog
        .track_page_view(&request.path, request.app_id, metadata)
        .await
        .map_err(|e| tracking_failure("page_view", e))?;

    record_page_view_tracked();

    Ok(Json(TrackResponse {
        success: true,
        id: Some(view.id),
    }))
}

fn tracking_failure(event: &'static str, err: CatalogError) -> ApiError {
    record_tracking_failure(event, err.code());
    err.into()
}
