//! App screenshot entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::AppScreenshot;

/// Database row mapping for the app_screenshots table.
#[derive(Debug, Clone, FromRow)]
pub struct AppScreenshotEntity {
    pub id: Uuid,
    pub app_id: Uuid,
    pub url: String,
    pub alt: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AppScreenshotEntity> for AppScreenshot {
    fn from(entity: AppScreenshotEntity) -> Self {
        Self {
            id: entity.id,
            app_id: entity.app_id,
            url: entity.url,
            alt: entity.alt,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
        }
    }
}
