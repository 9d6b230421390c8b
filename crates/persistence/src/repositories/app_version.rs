//! App version repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AppVersionEntity;
use crate::metrics::QueryTimer;

/// Repository for app version reads.
#[derive(Clone)]
pub struct AppVersionRepository {
    pool: PgPool,
}

impl AppVersionRepository {
    /// Creates a new AppVersionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a version by id, active or not.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AppVersionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_app_version_by_id");
        let result = sqlx::query_as::<_, AppVersionEntity>(
            r#"
            SELECT id, app_id, version, platform, file_url, file_size, file_hash,
                   changelog, system_requirements, is_active, created_at
            FROM app_versions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Every version of an app, newest first.
    pub async fn list_by_app(&self, app_id: Uuid) -> Result<Vec<AppVersionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_app_versions_by_app");
        let result = sqlx::query_as::<_, AppVersionEntity>(
            r#"
            SELECT id, app_id, version, platform, file_url, file_size, file_hash,
                   changelog, system_requirements, is_active, created_at
            FROM app_versions
            WHERE app_id = $1
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}
