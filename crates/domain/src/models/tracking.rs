//! Download and page-view event records.
//!
//! Both streams are append-only: rows are inserted once and never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::app_version::Platform;

/// Request metadata captured alongside tracking events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    /// Two-letter country code when the edge proxy provides one.
    pub country: Option<String>,
}

/// A recorded download of one app version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub id: Uuid,
    pub version_id: Uuid,
    pub platform: Platform,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A recorded page view, optionally tied to an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub id: Uuid,
    pub app_id: Option<Uuid>,
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Beacon payload for a download.
///
/// `platform` stays a string here so an unknown value surfaces as a
/// validation failure instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDownloadRequest {
    pub version_id: Uuid,
    pub platform: String,
}

/// Beacon payload for a page view.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackPageViewRequest {
    #[validate(custom(function = "shared::validation::validate_page_path"))]
    pub path: String,

    #[serde(default)]
    pub app_id: Option<Uuid>,
}

/// Response for tracking beacons.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}
