//! App domain model, detail aggregate and card projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::app_version::{active_platforms, current_version, AppVersion, Platform};
use super::category::{Category, CategorySummary};
use super::screenshot::AppScreenshot;

/// Default page size for app listings.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Default number of featured apps.
pub const DEFAULT_FEATURED_LIMIT: i64 = 6;

/// Default number of related apps shown on a detail page.
pub const DEFAULT_RELATED_LIMIT: i64 = 4;

/// Maximum length of a short description.
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 150;

// ============================================================================
// App Status Enum
// ============================================================================

/// Publication state of an app, driven by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Draft,
    Published,
    Hidden,
}

impl AppStatus {
    /// Returns the string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Draft => "draft",
            AppStatus::Published => "published",
            AppStatus::Hidden => "hidden",
        }
    }

    /// Only published apps are visible to catalog queries.
    pub fn is_published(&self) -> bool {
        matches!(self, AppStatus::Published)
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AppStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AppStatus::Draft),
            "published" => Ok(AppStatus::Published),
            "hidden" => Ok(AppStatus::Hidden),
            _ => Err(format!(
                "Invalid app status: {}. Must be one of: draft, published, hidden",
                s
            )),
        }
    }
}

// ============================================================================
// Core Model
// ============================================================================

/// A distributable app as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub icon_url: Option<String>,
    pub developer: Option<String>,
    pub website: Option<String>,
    pub status: AppStatus,
    pub featured: bool,
    /// Denormalized download counter; only ever grows.
    pub downloads_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An app joined with its category, every version and its screenshots.
///
/// Versions include inactive ones; callers pick what to offer through
/// [`AppWithDetails::current_downloads`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppWithDetails {
    #[serde(flatten)]
    pub app: App,
    pub category: Option<Category>,
    pub versions: Vec<AppVersion>,
    pub screenshots: Vec<AppScreenshot>,
}

impl AppWithDetails {
    /// Versions that may be offered for download.
    pub fn active_versions(&self) -> impl Iterator<Item = &AppVersion> {
        self.versions.iter().filter(|v| v.is_active)
    }

    /// Current download for one platform.
    pub fn current_version(&self, platform: Platform) -> Option<&AppVersion> {
        current_version(&self.versions, platform)
    }

    /// One current download per platform that has an active version.
    pub fn current_downloads(&self) -> Vec<&AppVersion> {
        Platform::ALL
            .iter()
            .filter_map(|p| self.current_version(*p))
            .collect()
    }

    /// Projects the detail aggregate onto a card.
    pub fn to_card(&self) -> AppCardData {
        AppCardData::project(&self.app, self.category.as_ref(), &self.versions)
    }
}

/// Reduced app view used by list and grid pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppCardData {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<CategorySummary>,
    pub downloads_count: i64,
    pub featured: bool,
    /// Platforms with at least one active version, in display order.
    pub platforms: Vec<Platform>,
}

impl AppCardData {
    /// Builds a card from an app, its category and its versions.
    ///
    /// `versions` may contain versions of other apps; only those owned by
    /// `app` contribute platforms.
    pub fn project(app: &App, category: Option<&Category>, versions: &[AppVersion]) -> Self {
        let owned: Vec<AppVersion> = versions
            .iter()
            .filter(|v| v.app_id == app.id)
            .cloned()
            .collect();

        Self {
            id: app.id,
            name: app.name.clone(),
            slug: app.slug.clone(),
            short_description: app.short_description.clone(),
            icon_url: app.icon_url.clone(),
            category: category.map(CategorySummary::from),
            downloads_count: app.downloads_count,
            featured: app.featured,
            platforms: active_platforms(&owned),
        }
    }
}

// ============================================================================
// Query DTOs
// ============================================================================

/// Filters for listing published apps. All filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct ListAppsQuery {
    /// Page size (default 20, 1-1000).
    #[serde(default)]
    pub limit: Option<i64>,

    /// Rows to skip (default 0).
    #[serde(default)]
    pub offset: Option<i64>,

    /// Category slug. Blank means no filter.
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_slug_filter"))]
    pub category: Option<String>,

    /// Case-insensitive substring over name and short description.
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_search_term"))]
    pub search: Option<String>,

    /// Restrict to featured (`true`) or non-featured (`false`) apps.
    #[serde(default)]
    pub featured: Option<bool>,
}

impl ListAppsQuery {
    /// Trimmed category slug, or `None` when absent or blank.
    pub fn category_slug(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Trimmed search term, or `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns true when `app` passes the search and featured filters.
    ///
    /// The category filter needs the category table and is applied by the
    /// caller.
    pub fn matches(&self, app: &App) -> bool {
        if let Some(featured) = self.featured {
            if app.featured != featured {
                return false;
            }
        }

        match self.search_term() {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                app.name.to_lowercase().contains(&needle)
                    || app
                        .short_description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            }
        }
    }
}

/// Catalog listing order: featured first, then newest, then id.
pub fn sort_for_listing(apps: &mut [&App]) {
    apps.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Related-apps order: most downloaded, then newest, then id.
pub fn sort_by_popularity(apps: &mut [&App]) {
    apps.sort_by(|a, b| {
        b.downloads_count
            .cmp(&a.downloads_count)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;

    fn app(slug: &str) -> App {
        let name: String = CompanyName().fake();
        App {
            id: Uuid::new_v4(),
            name,
            slug: slug.to_string(),
            description: "Long description".to_string(),
            short_description: Some("Short description".to_string()),
            category_id: None,
            tags: vec!["tools".to_string()],
            icon_url: None,
            developer: None,
            website: None,
            status: AppStatus::Published,
            featured: false,
            downloads_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn version(app_id: Uuid, platform: Platform, is_active: bool) -> AppVersion {
        AppVersion {
            id: Uuid::new_v4(),
            app_id,
            version: "1.0.0".to_string(),
            platform,
            file_url: "/demo/app.bin".to_string(),
            file_size: None,
            file_hash: None,
            changelog: None,
            system_requirements: None,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_app_status_round_trip_strings() {
        for status in [AppStatus::Draft, AppStatus::Published, AppStatus::Hidden] {
            assert_eq!(status.as_str().parse::<AppStatus>(), Ok(status));
        }
        assert!("archived".parse::<AppStatus>().is_err());
        assert!("Published".parse::<AppStatus>().is_err());
    }

    #[test]
    fn test_app_status_is_published() {
        assert!(AppStatus::Published.is_published());
        assert!(!AppStatus::Draft.is_published());
        assert!(!AppStatus::Hidden.is_published());
    }

    #[test]
    fn test_card_projection_uses_only_active_owned_versions() {
        let a = app("superapp-pro");
        let other = Uuid::new_v4();
        let versions = vec![
            version(a.id, Platform::Windows, true),
            version(a.id, Platform::Android, true),
            version(a.id, Platform::Android, true),
            version(a.id, Platform::Zip, false),
            version(other, Platform::Zip, true),
        ];

        let card = AppCardData::project(&a, None, &versions);
        assert_eq!(card.platforms, vec![Platform::Android, Platform::Windows]);
        assert_eq!(card.slug, "superapp-pro");
        assert!(card.category.is_none());
    }

    #[test]
    fn test_card_projection_embeds_category_summary() {
        let mut a = app("filemanager-plus");
        let category = Category {
            id: Uuid::new_v4(),
            name: "Tools".to_string(),
            slug: "tools".to_string(),
            description: None,
            icon: Some("🔧".to_string()),
            created_at: Utc::now(),
        };
        a.category_id = Some(category.id);

        let card = AppCardData::project(&a, Some(&category), &[]);
        assert_eq!(
            card.category,
            Some(CategorySummary {
                name: "Tools".to_string(),
                slug: "tools".to_string()
            })
        );
        assert!(card.platforms.is_empty());
    }

    #[test]
    fn test_details_current_downloads_one_per_platform() {
        let a = app("mediaplayer-hd");
        let mut old_windows = version(a.id, Platform::Windows, true);
        old_windows.created_at = Utc::now() - Duration::days(30);
        let new_windows = version(a.id, Platform::Windows, true);
        let inactive_android = version(a.id, Platform::Android, false);

        let details = AppWithDetails {
            app: a,
            category: None,
            versions: vec![old_windows, new_windows.clone(), inactive_android],
            screenshots: vec![],
        };

        let current = details.current_downloads();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, new_windows.id);
        assert_eq!(details.active_versions().count(), 2);
        assert_eq!(details.to_card().platforms, vec![Platform::Windows]);
    }

    #[test]
    fn test_details_serialization_flattens_app() {
        let details = AppWithDetails {
            app: app("securevault"),
            category: None,
            versions: vec![],
            screenshots: vec![],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["slug"], "securevault");
        assert_eq!(json["status"], "published");
        assert!(json["versions"].as_array().unwrap().is_empty());
        assert!(json.get("app").is_none());
    }

    #[test]
    fn test_list_query_search_term_trims_blank() {
        let query = ListAppsQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), None);

        let query = ListAppsQuery {
            search: Some("  photo ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), Some("photo"));
    }

    #[test]
    fn test_list_query_matches_search_case_insensitive() {
        let mut a = app("photoedit-pro");
        a.name = "PhotoEdit Pro".to_string();
        a.short_description = Some("Professional photo editing made easy".to_string());

        let by_name = ListAppsQuery {
            search: Some("photoedit".to_string()),
            ..Default::default()
        };
        assert!(by_name.matches(&a));

        let by_description = ListAppsQuery {
            search: Some("EDITING".to_string()),
            ..Default::default()
        };
        assert!(by_description.matches(&a));

        let miss = ListAppsQuery {
            search: Some("vault".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&a));
    }

    #[test]
    fn test_list_query_matches_featured_filter() {
        let mut a = app("gamemaster-2024");
        a.featured = true;

        let featured_only = ListAppsQuery {
            featured: Some(true),
            ..Default::default()
        };
        let non_featured_only = ListAppsQuery {
            featured: Some(false),
            ..Default::default()
        };
        assert!(featured_only.matches(&a));
        assert!(!non_featured_only.matches(&a));
        assert!(ListAppsQuery::default().matches(&a));
    }

    #[test]
    fn test_list_query_validation() {
        let valid = ListAppsQuery {
            category: Some("tools".to_string()),
            search: Some("file".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let bad_slug = ListAppsQuery {
            category: Some("Not A Slug".to_string()),
            ..Default::default()
        };
        assert!(bad_slug.validate().is_err());

        let padded_search = ListAppsQuery {
            search: Some(format!("photo{}", " ".repeat(100))),
            ..Default::default()
        };
        assert!(padded_search.validate().is_ok());

        let long_search = ListAppsQuery {
            search: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(long_search.validate().is_err());
    }

    #[test]
    fn test_list_query_blank_category_is_no_filter() {
        let blank = ListAppsQuery {
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_ok());
        assert_eq!(blank.category_slug(), None);

        let padded = ListAppsQuery {
            category: Some(" tools ".to_string()),
            ..Default::default()
        };
        assert_eq!(padded.category_slug(), Some("tools"));
    }

    #[test]
    fn test_list_query_deserialization_defaults() {
        let query: ListAppsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, ListAppsQuery::default());

        let query: ListAppsQuery =
            serde_json::from_str(r#"{"limit": 5, "featured": true, "category": "games"}"#)
                .unwrap();
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.featured, Some(true));
        assert_eq!(query.category.as_deref(), Some("games"));
    }

    #[test]
    fn test_sort_for_listing_featured_then_recency() {
        let mut old_featured = app("old-featured");
        old_featured.featured = true;
        old_featured.created_at = Utc::now() - Duration::days(100);
        let mut new_plain = app("new-plain");
        new_plain.created_at = Utc::now();
        let mut older_plain = app("older-plain");
        older_plain.created_at = Utc::now() - Duration::days(5);

        let mut apps = vec![&older_plain, &new_plain, &old_featured];
        sort_for_listing(&mut apps);
        let slugs: Vec<&str> = apps.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["old-featured", "new-plain", "older-plain"]);
    }

    #[test]
    fn test_sort_by_popularity_downloads_then_recency() {
        let mut popular = app("popular");
        popular.downloads_count = 500;
        let mut tied_new = app("tied-new");
        tied_new.downloads_count = 100;
        tied_new.created_at = Utc::now();
        let mut tied_old = app("tied-old");
        tied_old.downloads_count = 100;
        tied_old.created_at = Utc::now() - Duration::days(1);

        let mut apps = vec![&tied_old, &tied_new, &popular];
        sort_by_popularity(&mut apps);
        let slugs: Vec<&str> = apps.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["popular", "tied-new", "tied-old"]);
    }
}
