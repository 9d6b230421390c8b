//! App version domain model and platform handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Distribution platform of a downloadable build.
///
/// Variant order is the display order used for card platform lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Windows,
    Zip,
}

impl Platform {
    /// All platforms in display order.
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Windows, Platform::Zip];

    /// Returns the string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Windows => "windows",
            Platform::Zip => "zip",
        }
    }

    /// Label shown on download buttons.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Android => "Android APK",
            Platform::Windows => "Windows EXE",
            Platform::Zip => "ZIP Archive",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "windows" => Ok(Platform::Windows),
            "zip" => Ok(Platform::Zip),
            _ => Err(format!(
                "Invalid platform: {}. Must be one of: android, windows, zip",
                s
            )),
        }
    }
}

/// A downloadable build of an app for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppVersion {
    pub id: Uuid,
    pub app_id: Uuid,
    /// Free-form version label, usually semver.
    pub version: String,
    pub platform: Platform,
    pub file_url: String,
    /// Size in bytes.
    pub file_size: Option<i64>,
    pub file_hash: Option<String>,
    pub changelog: Option<String>,
    pub system_requirements: Option<String>,
    /// Inactive versions stay for history but are not offered for download.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Returns the current download for `platform`: the newest active version.
///
/// Ties on `created_at` go to the greater id so the choice is stable.
pub fn current_version(versions: &[AppVersion], platform: Platform) -> Option<&AppVersion> {
    versions
        .iter()
        .filter(|v| v.is_active && v.platform == platform)
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
}

/// Deduplicated platforms of the active versions, in display order.
pub fn active_platforms(versions: &[AppVersion]) -> Vec<Platform> {
    versions
        .iter()
        .filter(|v| v.is_active)
        .map(|v| v.platform)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Orders versions newest first (ties by id) for detail views.
pub fn sort_versions_newest_first(versions: &mut [AppVersion]) {
    versions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
