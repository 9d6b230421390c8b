//! Download event repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DownloadEntity;
use crate::metrics::QueryTimer;

/// Values for a new downloads row.
#[derive(Debug, Clone)]
pub struct NewDownload<'a> {
    pub version_id: Uuid,
    pub platform: &'a str,
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub referrer: Option<&'a str>,
    pub country: Option<&'a str>,
}

/// Repository for the append-only downloads stream.
#[derive(Clone)]
pub struct DownloadRepository {
    pool: PgPool,
}

impl DownloadRepository {
    /// Creates a new DownloadRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a download event.
    ///
    /// A trigger on the table bumps the owning app's `downloads_count` in
    /// the same statement.
    pub async fn create(&self, download: NewDownload<'_>) -> Result<DownloadEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_download");
        let result = sqlx::query_as::<_, DownloadEntity>(
            r#"
            INSERT INTO downloads (version_id, platform, ip_address, user_agent, referrer, country)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, version_id, platform, ip_address, user_agent, referrer, country, created_at
            "#,
        )
        .bind(download.version_id)
        .bind(download.platform)
        .bind(download.ip_address)
        .bind(download.user_agent)
        .bind(download.referrer)
        .bind(download.country)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }
}
