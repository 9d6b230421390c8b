//! Catalog query contract.
//!
//! Page and API code reads the catalog and appends tracking events only
//! through [`CatalogSource`]. Which implementation backs it is chosen once at
//! startup:
//! - [`MockCatalog`](super::mock_catalog::MockCatalog) serves seeded demo data
//! - a PostgreSQL implementation lives in the persistence crate
//! - [`UnavailableCatalog`] stands in when no backend is configured

use std::fmt;

use shared::pagination::{check_limit, Window, WindowError};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::models::app::DEFAULT_LIST_LIMIT;
use crate::models::{
    AppCardData, AppWithDetails, Category, ClientMetadata, Download, ListAppsQuery, PageView,
    Platform,
};

/// Failure kinds reported by every catalog operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Unexpected storage fault. The message is meant for logs only.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CatalogError {
    /// Stable snake_case label, used for metrics.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::InvalidArgument(_) => "invalid_argument",
            CatalogError::BackendUnavailable(_) => "backend_unavailable",
            CatalogError::Unknown(_) => "unknown",
        }
    }
}

impl From<WindowError> for CatalogError {
    fn from(err: WindowError) -> Self {
        CatalogError::InvalidArgument(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();
        CatalogError::InvalidArgument(messages.join(", "))
    }
}

/// Which strategy backs a catalog handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Live,
    Unavailable,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Mock => "mock",
            SourceKind::Live => "live",
            SourceKind::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read access to the catalog plus the two append-only event streams.
///
/// Implementations hold no cache; concurrent calls are independent.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Strategy behind this handle.
    fn kind(&self) -> SourceKind;

    /// Published apps as cards, ordered featured first, then newest, then id.
    async fn get_published_apps(
        &self,
        query: &ListAppsQuery,
    ) -> Result<Vec<AppCardData>, CatalogError>;

    /// Featured published apps.
    async fn get_featured_apps(&self, limit: i64) -> Result<Vec<AppCardData>, CatalogError> {
        let query = ListAppsQuery {
            limit: Some(limit),
            featured: Some(true),
            ..Default::default()
        };
        self.get_published_apps(&query).await
    }

    /// A published app with category, versions and screenshots.
    ///
    /// Drafts and hidden apps resolve to `None`, exactly like missing slugs.
    async fn get_app_by_slug(&self, slug: &str) -> Result<Option<AppWithDetails>, CatalogError>;

    /// Same as [`get_app_by_slug`](Self::get_app_by_slug) but ignores status.
    /// Reserved for administrator-facing callers.
    async fn get_app_by_slug_privileged(
        &self,
        slug: &str,
    ) -> Result<Option<AppWithDetails>, CatalogError>;

    /// All categories ordered by name, then slug.
    async fn get_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Published apps related to `app_id`, most downloaded first.
    ///
    /// Restricted to `category_id` when given, otherwise catalog-wide.
    async fn get_related_apps(
        &self,
        app_id: Uuid,
        category_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<AppCardData>, CatalogError>;

    /// Appends a download event for `version_id`.
    ///
    /// Fails with `NotFound` for an unknown version and `InvalidArgument`
    /// when `platform` differs from the version's platform.
    async fn track_download(
        &self,
        version_id: Uuid,
        platform: Platform,
        metadata: ClientMetadata,
    ) -> Result<Download, CatalogError>;

    /// Appends a page-view event. `path` must be non-blank.
    async fn track_page_view(
        &self,
        path: &str,
        app_id: Option<Uuid>,
        metadata: ClientMetadata,
    ) -> Result<PageView, CatalogError>;

    /// Verifies the backend answers.
    async fn health_check(&self) -> Result<(), CatalogError>;

    /// Releases the backend handle. Called once at shutdown.
    async fn close(&self) {}
}

/// Validates listing filters and resolves the page window.
pub fn prepare_list_query(query: &ListAppsQuery) -> Result<Window, CatalogError> {
    query.validate()?;
    Ok(Window::resolve(query.limit, query.offset, DEFAULT_LIST_LIMIT)?)
}

/// Validates a bare result limit.
pub fn prepare_limit(limit: i64) -> Result<i64, CatalogError> {
    Ok(check_limit(limit)?)
}

/// Validates a page-view path.
pub fn prepare_page_path(path: &str) -> Result<(), CatalogError> {
    shared::validation::validate_page_path(path).map_err(|e| {
        CatalogError::InvalidArgument(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string()),
        )
    })
}

/// Fails a download whose requested platform differs from the version's.
pub fn check_platform_matches(expected: Platform, requested: Platform) -> Result<(), CatalogError> {
    if expected == requested {
        Ok(())
    } else {
        Err(CatalogError::InvalidArgument(format!(
            "Version is published for {}, not {}",
            expected, requested
        )))
    }
}

// ============================================================================
// Unavailable strategy
// ============================================================================

/// Catalog used when the live backend has no credentials.
///
/// Every operation reports `BackendUnavailable` so callers can render a
/// degraded page instead of crashing.
#[derive(Debug, Clone)]
pub struct UnavailableCatalog {
    reason: String,
}

impl UnavailableCatalog {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> CatalogError {
        CatalogError::BackendUnavailable(self.reason.clone())
    }
}

#[async_trait::async_trait]
impl CatalogSource for UnavailableCatalog {
    fn kind(&self) -> SourceKind {
        SourceKind::Unavailable
    }

    async fn get_published_apps(
        &self,
        _query: &ListAppsQuery,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        Err(self.error())
    }

    async fn get_app_by_slug(&self, _slug: &str) -> Result<Option<AppWithDetails>, CatalogError> {
        Err(self.error())
    }

    async fn get_app_by_slug_privileged(
        &self,
        _slug: &str,
    ) -> Result<Option<AppWithDetails>, CatalogError> {
        Err(self.error())
    }

    async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Err(self.error())
    }

    async fn get_related_apps(
        &self,
        _app_id: Uuid,
        _category_id: Option<Uuid>,
        _limit: i64,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        Err(self.error())
    }

    async fn track_download(
        &self,
        _version_id: Uuid,
        _platform: Platform,
        _metadata: ClientMetadata,
    ) -> Result<Download, CatalogError> {
        Err(self.error())
    }

    async fn track_page_view(
        &self,
        _path: &str,
        _app_id: Option<Uuid>,
        _metadata: ClientMetadata,
    ) -> Result<PageView, CatalogError> {
        Err(self.error())
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::NotFound("app".to_string()).to_string(),
            "Not found: app"
        );
        assert_eq!(
            CatalogError::InvalidArgument("limit".to_string()).to_string(),
            "Invalid argument: limit"
        );
        assert_eq!(
            CatalogError::BackendUnavailable("no url".to_string()).to_string(),
            "Backend unavailable: no url"
        );
        assert_eq!(
            CatalogError::Unknown("boom".to_string()).to_string(),
            "Unknown error: boom"
        );
    }

    #[test]
    fn test_catalog_error_code() {
        assert_eq!(CatalogError::NotFound(String::new()).code(), "not_found");
        assert_eq!(
            CatalogError::BackendUnavailable(String::new()).code(),
            "backend_unavailable"
        );
    }

    #[test]
    fn test_prepare_list_query_defaults() {
        let window = prepare_list_query(&ListAppsQuery::default()).unwrap();
        assert_eq!(window.limit, DEFAULT_LIST_LIMIT);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_prepare_list_query_rejects_bad_pagination() {
        for (limit, offset) in [(Some(0), None), (Some(-1), None), (Some(1001), None), (None, Some(-5))] {
            let query = ListAppsQuery {
                limit,
                offset,
                ..Default::default()
            };
            assert!(matches!(
                prepare_list_query(&query),
                Err(CatalogError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_prepare_list_query_rejects_bad_category_slug() {
        let query = ListAppsQuery {
            category: Some("Tools & More".to_string()),
            ..Default::default()
        };
        match prepare_list_query(&query) {
            Err(CatalogError::InvalidArgument(msg)) => assert!(msg.starts_with("category:")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_prepare_limit() {
        assert_eq!(prepare_limit(4), Ok(4));
        assert!(matches!(prepare_limit(0), Err(CatalogError::InvalidArgument(_))));
    }

    #[test]
    fn test_prepare_page_path() {
        assert!(prepare_page_path("/apps").is_ok());
        assert_eq!(
            prepare_page_path(""),
            Err(CatalogError::InvalidArgument("Path must not be empty".to_string()))
        );
    }

    #[test]
    fn test_check_platform_matches() {
        assert!(check_platform_matches(Platform::Android, Platform::Android).is_ok());
        let err = check_platform_matches(Platform::Android, Platform::Windows).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidArgument(
                "Version is published for android, not windows".to_string()
            )
        );
    }

    #[test]
    fn test_source_kind_display() {
        assert_eq!(SourceKind::Mock.to_string(), "mock");
        assert_eq!(SourceKind::Live.to_string(), "live");
        assert_eq!(SourceKind::Unavailable.to_string(), "unavailable");
    }

    #[tokio::test]
    async fn test_unavailable_catalog_fails_every_operation() {
        let catalog = UnavailableCatalog::new("database url not configured");
        let expected =
            CatalogError::BackendUnavailable("database url not configured".to_string());

        assert_eq!(catalog.kind(), SourceKind::Unavailable);
        assert_eq!(
            catalog.get_published_apps(&ListAppsQuery::default()).await,
            Err(expected.clone())
        );
        assert_eq!(catalog.get_featured_apps(6).await, Err(expected.clone()));
        assert_eq!(catalog.get_app_by_slug("demo").await, Err(expected.clone()));
        assert_eq!(
            catalog.get_app_by_slug_privileged("demo").await,
            Err(expected.clone())
        );
        assert_eq!(catalog.get_categories().await, Err(expected.clone()));
        assert_eq!(
            catalog.get_related_apps(Uuid::nil(), None, 4).await,
            Err(expected.clone())
        );
        assert_eq!(
            catalog
                .track_download(Uuid::nil(), Platform::Zip, ClientMetadata::default())
                .await,
            Err(expected.clone())
        );
        assert_eq!(
            catalog
                .track_page_view("/", None, ClientMetadata::default())
                .await,
            Err(expected.clone())
        );
        assert_eq!(catalog.health_check().await, Err(expected));
        catalog.close().await;
    }
}
