//! Page view event repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PageViewEntity;
use crate::metrics::QueryTimer;

/// Values for a new page_views row.
#[derive(Debug, Clone)]
pub struct NewPageView<'a> {
    pub app_id: Option<Uuid>,
    pub path: &'a str,
    pub referrer: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub ip_address: Option<&'a str>,
}

/// Repository for the append-only page_views stream.
#[derive(Clone)]
pub struct PageViewRepository {
    pool: PgPool,
}

impl PageViewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a page view. A missing `app_id` fails with a foreign key
    /// violation.
    pub async fn create(&self, view: NewPageView<'_>) -> Result<PageViewEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_page_view");
        let result = sqlx::query_as::<_, PageViewEntity>(
            r#"
            INSERT INTO page_views (app_id, path, referrer, user_agent, ip_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, app_id, path, referrer, user_agent, ip_address, created_at
            "#,
        )
        .bind(view.app_id)
        .bind(view.path)
        .bind(view.referrer)
        .bind(view.user_agent)
        .bind(view.ip_address)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }
}
