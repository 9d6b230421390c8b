//! App catalog endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::app::{DEFAULT_FEATURED_LIMIT, DEFAULT_RELATED_LIMIT};
use domain::models::{AppCardData, AppVersion, AppWithDetails, ClientMetadata, ListAppsQuery};
use serde::{Deserialize, Serialize};
use shared::format::{format_download_count, format_file_size};
use tracing::warn;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, ClientMeta};
use crate::middleware::metrics::{record_page_view_tracked, record_tracking_failure};

/// Response for card listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppListResponse {
    pub apps: Vec<AppCardData>,
}

/// Query parameters carrying only a limit.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// One downloadable build on the detail page.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadOption {
    pub version_id: Uuid,
    pub version: String,
    pub platform: String,
    pub platform_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub file_size_label: Option<String>,
    pub changelog: Option<String>,
    pub system_requirements: Option<String>,
}

impl From<&AppVersion> for DownloadOption {
    fn from(version: &AppVersion) -> Self {
        Self {
            version_id: version.id,
            version: version.version.clone(),
            platform: version.platform.as_str().to_string(),
            platform_name: version.platform.display_name().to_string(),
            file_url: version.file_url.clone(),
            file_size: version.file_size,
            file_size_label: version.file_size.map(format_file_size),
            changelog: version.changelog.clone(),
            system_requirements: version.system_requirements.clone(),
        }
    }
}

/// Detail page payload.
#[derive(Debug, Serialize)]
pub struct AppDetailResponse {
    #[serde(flatten)]
    pub details: AppWithDetails,
    pub downloads_label: String,
    pub current_downloads: Vec<DownloadOption>,
    pub related_apps: Vec<AppCardData>,
}

/// List published apps.
///
/// GET /api/v1/apps?limit&offset&category&search&featured
pub async fn list_apps(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListAppsQuery>,
) -> Result<Json<AppListResponse>, ApiError> {
    let apps = state.catalog.get_published_apps(&query).await?;
    Ok(Json(AppListResponse { apps }))
}

/// List featured apps.
///
/// GET /api/v1/apps/featured?limit
pub async fn featured_apps(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<AppListResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    let apps = state.catalog.get_featured_apps(limit).await?;
    Ok(Json(AppListResponse { apps }))
}

/// App detail with current downloads and related apps.
///
/// GET /api/v1/apps/:slug
///
/// Records a page view in the background; its outcome never changes the
/// response.
pub async fn get_app(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ClientMeta(metadata): ClientMeta,
) -> Result<Json<AppDetailResponse>, ApiError> {
    let details = state
        .catalog
        .get_app_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("App '{}' not found", slug)))?;

    let related_apps = state
        .catalog
        .get_related_apps(details.app.id, details.app.category_id, DEFAULT_RELATED_LIMIT)
        .await?;

    spawn_page_view(&state, format!("/apps/{}", details.app.slug), details.app.id, metadata);

    let current_downloads = details
        .current_downloads()
        .into_iter()
        .map(DownloadOption::from)
        .collect();

    Ok(Json(AppDetailResponse {
        downloads_label: format_download_count(details.app.downloads_count),
        current_downloads,
        related_apps,
        details,
    }))
}

/// Related apps for a published app.
///
/// GET /api/v1/apps/:slug/related?limit
pub async fn related_apps(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<AppListResponse>, ApiError> {
    let details = state
        .catalog
        .get_app_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("App '{}' not found", slug)))?;

    let apps = state
        .catalog
        .get_related_apps(
            details.app.id,
            details.app.category_id,
            query.limit.unwrap_or(DEFAULT_RELATED_LIMIT),
        )
        .await?;
    Ok(Json(AppListResponse { apps }))
}

fn spawn_page_view(state: &AppState, path: String, app_id: Uuid, metadata: ClientMetadata) {
    let catalog = state.catalog.clone();
    tokio::spawn(async move {
        match catalog.track_page_view(&path, Some(app_id), metadata).await {
            Ok(_) => record_page_view_tracked(),
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to record page view");
                record_tracking_failure("page_view", e.code());
            }
        }
    });
}
