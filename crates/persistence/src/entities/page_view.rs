//! Page view event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::PageView;

/// Database row mapping for the page_views table.
#[derive(Debug, Clone, FromRow)]
pub struct PageViewEntity {
    pub id: Uuid,
    pub app_id: Option<Uuid>,
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PageViewEntity> for PageView {
    fn from(entity: PageViewEntity) -> Self {
        Self {
            id: entity.id,
            app_id: entity.app_id,
            path: entity.path,
            referrer: entity.referrer,
            user_agent: entity.user_agent,
            ip_address: entity.ip_address,
            created_at: entity.created_at,
        }
    }
}
