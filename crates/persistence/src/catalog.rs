//! PostgreSQL catalog strategy.

use domain::models::{
    AppCardData, AppVersion, AppWithDetails, Category, ClientMetadata, Download, ListAppsQuery,
    PageView, Platform,
};
use domain::services::catalog::{
    check_platform_matches, prepare_limit, prepare_list_query, prepare_page_path, CatalogError,
    CatalogSource, SourceKind,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::metrics::{record_pool_metrics, QueryTimer};
use crate::repositories::{
    AppListFilter, AppRepository, AppScreenshotRepository, AppVersionRepository,
    CategoryRepository, DownloadRepository, NewDownload, NewPageView, PageViewRepository,
};

/// Maps a driver error onto the catalog failure kinds.
///
/// Connection-level faults become `BackendUnavailable`; a foreign key
/// violation means a referenced row is gone and becomes `NotFound`. The
/// connection URL never appears in a message.
pub fn map_db_error(err: sqlx::Error) -> CatalogError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => CatalogError::BackendUnavailable(err.to_string()),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string());
            if code.as_deref() == Some("23503") {
                CatalogError::NotFound(db_err.message().to_string())
            } else {
                CatalogError::Unknown(format!(
                    "{}: {}",
                    code.as_deref().unwrap_or("?????"),
                    db_err.message()
                ))
            }
        }
        _ => CatalogError::Unknown(err.to_string()),
    }
}

/// Catalog backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
    apps: AppRepository,
    categories: CategoryRepository,
    versions: AppVersionRepository,
    screenshots: AppScreenshotRepository,
    downloads: DownloadRepository,
    page_views: PageViewRepository,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            apps: AppRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            versions: AppVersionRepository::new(pool.clone()),
            screenshots: AppScreenshotRepository::new(pool.clone()),
            downloads: DownloadRepository::new(pool.clone()),
            page_views: PageViewRepository::new(pool.clone()),
            pool,
        }
    }

    /// Underlying pool, for migrations at startup.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn details(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> Result<Option<AppWithDetails>, CatalogError> {
        let app = match self
            .apps
            .find_by_slug(slug, include_unpublished)
            .await
            .map_err(map_db_error)?
        {
            Some(app) => app,
            None => return Ok(None),
        };

        let category_lookup = async {
            match app.category_id {
                Some(id) => self.categories.find_by_id(id).await,
                None => Ok(None),
            }
        };
        let (category, versions, screenshots) = tokio::try_join!(
            category_lookup,
            self.versions.list_by_app(app.id),
            self.screenshots.list_by_app(app.id),
        )
        .map_err(map_db_error)?;

        let versions = versions
            .into_iter()
            .map(AppVersion::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CatalogError::Unknown)?;

        Ok(Some(AppWithDetails {
            app: app.into(),
            category: category.map(Category::from),
            versions,
            screenshots: screenshots.into_iter().map(Into::into).collect(),
        }))
    }
}

#[async_trait::async_trait]
impl CatalogSource for PgCatalog {
    fn kind(&self) -> SourceKind {
        SourceKind::Live
    }

    async fn get_published_apps(
        &self,
        query: &ListAppsQuery,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        let window = prepare_list_query(query)?;
        let filter = AppListFilter {
            category_slug: query.category_slug(),
            search: query.search_term(),
            featured: query.featured,
        };

        let rows = self
            .apps
            .list_published_cards(&filter, window)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_app_by_slug(&self, slug: &str) -> Result<Option<AppWithDetails>, CatalogError> {
        self.details(slug, false).await
    }

    async fn get_app_by_slug_privileged(
        &self,
        slug: &str,
    ) -> Result<Option<AppWithDetails>, CatalogError> {
        self.details(slug, true).await
    }

    async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let rows = self.categories.list_all().await.map_err(map_db_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_related_apps(
        &self,
        app_id: Uuid,
        category_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        let limit = prepare_limit(limit)?;
        let rows = self
            .apps
            .list_related_cards(app_id, category_id, limit)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn track_download(
        &self,
        version_id: Uuid,
        platform: Platform,
        metadata: ClientMetadata,
    ) -> Result<Download, CatalogError> {
        let version = self
            .versions
            .find_by_id(version_id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| CatalogError::NotFound(format!("App version {} not found", version_id)))?;
        let version = AppVersion::try_from(version).map_err(CatalogError::Unknown)?;
        check_platform_matches(version.platform, platform)?;

        // The version may be deleted between the lookup and the insert; the
        // foreign key then reports NotFound.
        let row = self
            .downloads
            .create(NewDownload {
                version_id,
                platform: platform.as_str(),
                ip_address: metadata.ip_address.as_deref(),
                user_agent: metadata.user_agent.as_deref(),
                referrer: metadata.referrer.as_deref(),
                country: metadata.country.as_deref(),
            })
            .await
            .map_err(map_db_error)?;

        tracing::debug!(download_id = %row.id, version_id = %version_id, "Download recorded");

        Download::try_from(row).map_err(CatalogError::Unknown)
    }

    async fn track_page_view(
        &self,
        path: &str,
        app_id: Option<Uuid>,
        metadata: ClientMetadata,
    ) -> Result<PageView, CatalogError> {
        prepare_page_path(path)?;

        let row = self
            .page_views
            .create(NewPageView {
                app_id,
                path,
                referrer: metadata.referrer.as_deref(),
                user_agent: metadata.user_agent.as_deref(),
                ip_address: metadata.ip_address.as_deref(),
            })
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        let timer = QueryTimer::new("health_check");
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        let result = timer.finish(result);
        record_pool_metrics(&self.pool);
        result.map(|_| ()).map_err(map_db_error)
    }

    async fn close(&self) {
        tracing::info!("Closing catalog connection pool");
        self.pool.close().await;
    }
}
