//! App screenshot repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AppScreenshotEntity;
use crate::metrics::QueryTimer;

/// Repository for app screenshot reads.
#[derive(Clone)]
pub struct AppScreenshotRepository {
    pool: PgPool,
}

impl AppScreenshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Screenshots of an app in display order.
    pub async fn list_by_app(
        &self,
        app_id: Uuid,
    ) -> Result<Vec<AppScreenshotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_app_screenshots_by_app");
        let result = sqlx::query_as::<_, AppScreenshotEntity>(
            r#"
            SELECT id, app_id, url, alt, sort_order, created_at
            FROM app_screenshots
            WHERE app_id = $1
            ORDER BY sort_order ASC, created_at ASC, id ASC
            "#,
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}
