//! Download event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Download;

/// Database row mapping for the downloads table.
#[derive(Debug, Clone, FromRow)]
pub struct DownloadEntity {
    pub id: Uuid,
    pub version_id: Uuid,
    pub platform: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DownloadEntity> for Download {
    type Error = String;

    fn try_from(entity: DownloadEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            version_id: entity.version_id,
            platform: entity.platform.parse()?,
            ip_address: entity.ip_address,
            user_agent: entity.user_agent,
            referrer: entity.referrer,
            country: entity.country,
            created_at: entity.created_at,
        })
    }
}
