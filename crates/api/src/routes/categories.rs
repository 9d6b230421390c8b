//! Category endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{AppCardData, Category, ListAppsQuery};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiQuery;

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryAppsResponse {
    pub category: Category,
    pub apps: Vec<AppCardData>,
}

/// Paging for a category listing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryAppsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = state.catalog.get_categories().await?;
    Ok(Json(CategoryListResponse { categories }))
}

/// Published apps in one category.
///
/// GET /api/v1/categories/:slug/apps?limit&offset
///
/// Unlike the unfiltered listing, an unknown category slug is a 404 here.
pub async fn list_category_apps(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(paging): ApiQuery<CategoryAppsQuery>,
) -> Result<Json<CategoryAppsResponse>, ApiError> {
    let category = state
        .catalog
        .get_categories()
        .await?
        .into_iter()
        .find(|c| c.slug == slug)
        .ok_or_else(|| ApiError::NotFound(format!("Category '{}' not found", slug)))?;

    let query = ListAppsQuery {
        limit: paging.limit,
        offset: paging.offset,
        category: Some(category.slug.clone()),
        ..Default::default()
    };
    let apps = state.catalog.get_published_apps(&query).await?;

    Ok(Json(CategoryAppsResponse { category, apps }))
}
