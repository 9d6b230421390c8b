//! App version entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::AppVersion;

/// Database row mapping for the app_versions table.
#[derive(Debug, Clone, FromRow)]
pub struct AppVersionEntity {
    pub id: Uuid,
    pub app_id: Uuid,
    pub version: String,
    pub platform: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub file_hash: Option<String>,
    pub changelog: Option<String>,
    pub system_requirements: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fails when the stored platform is not a known one; a version with no
/// usable platform cannot be offered for download.
impl TryFrom<AppVersionEntity> for AppVersion {
    type Error = String;

    fn try_from(entity: AppVersionEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            app_id: entity.app_id,
            version: entity.version,
            platform: entity.platform.parse()?,
            file_url: entity.file_url,
            file_size: entity.file_size,
            file_hash: entity.file_hash,
            changelog: entity.changelog,
            system_requirements: entity.system_requirements,
            is_active: entity.is_active,
            created_at: entity.created_at,
        })
    }
}
