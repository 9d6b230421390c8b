//! App screenshot domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A screenshot attached to an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppScreenshot {
    pub id: Uuid,
    pub app_id: Uuid,
    pub url: String,
    pub alt: Option<String>,
    /// Ascending display position.
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Orders screenshots by `sort_order`, then creation time, then id.
pub fn sort_screenshots(screenshots: &mut [AppScreenshot]) {
    screenshots.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}
