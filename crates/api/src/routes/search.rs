//! Search endpoint handler.

use axum::{extract::State, Json};
use domain::models::{AppCardData, ListAppsQuery};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiQuery;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub apps: Vec<AppCardData>,
}

/// Search published apps by name or short description.
///
/// GET /api/v1/search?q&limit
///
/// A missing or blank `q` returns no results rather than the whole catalog.
pub async fn search_apps(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = params.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Ok(Json(SearchResponse {
            query: String::new(),
            apps: vec![],
        }));
    }

    let query = ListAppsQuery {
        limit: params.limit,
        search: Some(term.to_string()),
        ..Default::default()
    };
    let apps = state.catalog.get_published_apps(&query).await?;

    Ok(Json(SearchResponse {
        query: term.to_string(),
        apps,
    }))
}
