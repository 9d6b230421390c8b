//! In-memory catalog used for demo deployments and tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::catalog::{
    check_platform_matches, prepare_limit, prepare_list_query, prepare_page_path, CatalogError,
    CatalogSource, SourceKind,
};
use crate::models::app::{sort_by_popularity, sort_for_listing};
use crate::models::app_version::sort_versions_newest_first;
use crate::models::category::sort_categories;
use crate::models::screenshot::sort_screenshots;
use crate::models::{
    App, AppCardData, AppScreenshot, AppStatus, AppVersion, AppWithDetails, Category,
    ClientMetadata, Download, ListAppsQuery, PageView, Platform,
};

/// Catalog rows loaded into a [`MockCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub categories: Vec<Category>,
    pub apps: Vec<App>,
    pub versions: Vec<AppVersion>,
    pub screenshots: Vec<AppScreenshot>,
}

#[derive(Debug, Default)]
struct MockState {
    seed: CatalogSeed,
    downloads: Vec<Download>,
    page_views: Vec<PageView>,
}

impl MockState {
    fn category(&self, id: Option<Uuid>) -> Option<&Category> {
        let id = id?;
        self.seed.categories.iter().find(|c| c.id == id)
    }

    fn card(&self, app: &App) -> AppCardData {
        AppCardData::project(app, self.category(app.category_id), &self.seed.versions)
    }

    fn details(&self, slug: &str, published_only: bool) -> Option<AppWithDetails> {
        let app = self.seed.apps.iter().find(|a| a.slug == slug)?;
        if published_only && !app.status.is_published() {
            return None;
        }

        let mut versions: Vec<AppVersion> = self
            .seed
            .versions
            .iter()
            .filter(|v| v.app_id == app.id)
            .cloned()
            .collect();
        sort_versions_newest_first(&mut versions);

        let mut screenshots: Vec<AppScreenshot> = self
            .seed
            .screenshots
            .iter()
            .filter(|s| s.app_id == app.id)
            .cloned()
            .collect();
        sort_screenshots(&mut screenshots);

        Some(AppWithDetails {
            app: app.clone(),
            category: self.category(app.category_id).cloned(),
            versions,
            screenshots,
        })
    }
}

/// Catalog backed by seeded in-memory rows.
///
/// Tracking events are appended to in-memory streams and bump the owning
/// app's `downloads_count`, so a demo deployment behaves like the live one.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    state: Arc<RwLock<MockState>>,
}

impl MockCatalog {
    /// Create a mock catalog over the given rows.
    pub fn new(seed: CatalogSeed) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState {
                seed,
                ..Default::default()
            })),
        }
    }

    /// Create a mock catalog with the demo data set.
    pub fn demo() -> Self {
        Self::new(CatalogSeed::demo())
    }

    /// Downloads recorded so far, oldest first.
    pub async fn recorded_downloads(&self) -> Vec<Download> {
        self.state.read().await.downloads.clone()
    }

    /// Page views recorded so far, oldest first.
    pub async fn recorded_page_views(&self) -> Vec<PageView> {
        self.state.read().await.page_views.clone()
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalog {
    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }

    async fn get_published_apps(
        &self,
        query: &ListAppsQuery,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        let window = prepare_list_query(query)?;
        let state = self.state.read().await;

        let category_id = match query.category_slug() {
            Some(slug) => match state.seed.categories.iter().find(|c| c.slug == slug) {
                Some(category) => Some(category.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut apps: Vec<&App> = state
            .seed
            .apps
            .iter()
            .filter(|a| a.status.is_published())
            .filter(|a| category_id.is_none() || a.category_id == category_id)
            .filter(|a| query.matches(a))
            .collect();
        sort_for_listing(&mut apps);

        let range = window.range(apps.len());
        Ok(apps[range].iter().map(|a| state.card(a)).collect())
    }

    async fn get_app_by_slug(&self, slug: &str) -> Result<Option<AppWithDetails>, CatalogError> {
        Ok(self.state.read().await.details(slug, true))
    }

    async fn get_app_by_slug_privileged(
        &self,
        slug: &str,
    ) -> Result<Option<AppWithDetails>, CatalogError> {
        Ok(self.state.read().await.details(slug, false))
    }

    async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut categories = self.state.read().await.seed.categories.clone();
        sort_categories(&mut categories);
        Ok(categories)
    }

    async fn get_related_apps(
        &self,
        app_id: Uuid,
        category_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<AppCardData>, CatalogError> {
        let limit = prepare_limit(limit)?;
        let state = self.state.read().await;

        let mut apps: Vec<&App> = state
            .seed
            .apps
            .iter()
            .filter(|a| a.status.is_published() && a.id != app_id)
            .filter(|a| category_id.is_none() || a.category_id == category_id)
            .collect();
        sort_by_popularity(&mut apps);

        Ok(apps
            .into_iter()
            .take(limit as usize)
            .map(|a| state.card(a))
            .collect())
    }

    async fn track_download(
        &self,
        version_id: Uuid,
        platform: Platform,
        metadata: ClientMetadata,
    ) -> Result<Download, CatalogError> {
        let mut state = self.state.write().await;

        let version = state
            .seed
            .versions
            .iter()
            .find(|v| v.id == version_id)
            .ok_or_else(|| CatalogError::NotFound(format!("App version {} not found", version_id)))?;
        check_platform_matches(version.platform, platform)?;
        let app_id = version.app_id;

        let download = Download {
            id: Uuid::new_v4(),
            version_id,
            platform,
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
            referrer: metadata.referrer,
            country: metadata.country,
            created_at: Utc::now(),
        };

        if let Some(app) = state.seed.apps.iter_mut().find(|a| a.id == app_id) {
            app.downloads_count = app.downloads_count.saturating_add(1);
        }
        state.downloads.push(download.clone());

        tracing::debug!(
            download_id = %download.id,
            version_id = %version_id,
            platform = %platform,
            "Mock: Recorded download"
        );

        Ok(download)
    }

    async fn track_page_view(
        &self,
        path: &str,
        app_id: Option<Uuid>,
        metadata: ClientMetadata,
    ) -> Result<PageView, CatalogError> {
        prepare_page_path(path)?;
        let mut state = self.state.write().await;

        if let Some(id) = app_id {
            if !state.seed.apps.iter().any(|a| a.id == id) {
                return Err(CatalogError::NotFound(format!("App {} not found", id)));
            }
        }

        let page_view = PageView {
            id: Uuid::new_v4(),
            app_id,
            path: path.to_string(),
            referrer: metadata.referrer,
            user_agent: metadata.user_agent,
            ip_address: metadata.ip_address,
            created_at: Utc::now(),
        };
        state.page_views.push(page_view.clone());

        tracing::debug!(page_view_id = %page_view.id, path = %path, "Mock: Recorded page view");

        Ok(page_view)
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

// ============================================================================
// Demo data
// ============================================================================

/// 2024-01-01T00:00:00Z, the anchor for every demo timestamp.
const DEMO_EPOCH_SECS: i64 = 1_704_067_200;

fn demo_time(days: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(DEMO_EPOCH_SECS, 0).unwrap_or_default() + Duration::days(days)
}

fn demo_id(kind: u128, n: u128) -> Uuid {
    Uuid::from_u128((kind << 64) | n)
}

struct DemoApp {
    name: &'static str,
    slug: &'static str,
    short_description: &'static str,
    category: &'static str,
    downloads: i64,
    featured: bool,
    status: AppStatus,
    platforms: &'static [Platform],
}

const DEMO_CATEGORIES: [(&str, &str, &str, &str); 6] = [
    ("Android Apps", "android", "Android APK applications", "📱"),
    ("Windows Software", "windows", "Windows EXE applications", "💻"),
    ("Tools", "tools", "Utility tools and software", "🔧"),
    ("Games", "games", "Games for all platforms", "🎮"),
    ("Media", "media", "Media and entertainment", "🎬"),
    ("Productivity", "productivity", "Productivity apps", "📊"),
];

const DEMO_APPS: [DemoApp; 7] = [
    DemoApp {
        name: "SuperApp Pro",
        slug: "superapp-pro",
        short_description: "The ultimate productivity app for Android and Windows",
        category: "productivity",
        downloads: 125_000,
        featured: true,
        status: AppStatus::Published,
        platforms: &[Platform::Android, Platform::Windows],
    },
    DemoApp {
        name: "GameMaster 2024",
        slug: "gamemaster-2024",
        short_description: "Epic gaming experience with stunning graphics",
        category: "games",
        downloads: 89_000,
        featured: true,
        status: AppStatus::Published,
        platforms: &[Platform::Android, Platform::Windows],
    },
    DemoApp {
        name: "FileManager Plus",
        slug: "filemanager-plus",
        short_description: "Advanced file management for all your needs",
        category: "tools",
        downloads: 56_000,
        featured: false,
        status: AppStatus::Published,
        platforms: &[Platform::Android],
    },
    DemoApp {
        name: "MediaPlayer HD",
        slug: "mediaplayer-hd",
        short_description: "Play any video format in stunning HD quality",
        category: "media",
        downloads: 234_000,
        featured: true,
        status: AppStatus::Published,
        platforms: &[Platform::Windows],
    },
    DemoApp {
        name: "SecureVault",
        slug: "securevault",
        short_description: "Keep your files safe with military-grade encryption",
        category: "tools",
        downloads: 45_000,
        featured: false,
        status: AppStatus::Published,
        platforms: &[Platform::Android, Platform::Windows],
    },
    DemoApp {
        name: "PhotoEdit Pro",
        slug: "photoedit-pro",
        short_description: "Professional photo editing made easy",
        category: "media",
        downloads: 178_000,
        featured: false,
        status: AppStatus::Published,
        platforms: &[Platform::Android, Platform::Windows],
    },
    DemoApp {
        name: "NoteSync Beta",
        slug: "notesync-beta",
        short_description: "Cross-device notes, not yet released",
        category: "productivity",
        downloads: 0,
        featured: false,
        status: AppStatus::Draft,
        platforms: &[Platform::Zip],
    },
];

const SUPERAPP_DESCRIPTION: &str = "SuperApp Pro is the ultimate productivity application designed for modern professionals who demand the best. With its intuitive interface and powerful features, SuperApp Pro transforms the way you work, helping you accomplish more in less time.

Key Features:
• Smart Task Management: Organize your tasks with intelligent categorization and priority sorting
• Cloud Sync: Access your data from any device, anywhere in the world
• Collaboration Tools: Share projects and collaborate with team members in real-time
• Custom Workflows: Create automated workflows to streamline repetitive tasks
• Advanced Analytics: Track your productivity with detailed insights and reports

Download SuperApp Pro today and experience the future of productivity!";

impl CatalogSeed {
    /// Demo catalog: six categories, six published apps and one draft.
    pub fn demo() -> Self {
        let categories: Vec<Category> = DEMO_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, (name, slug, description, icon))| Category {
                id: demo_id(1, i as u128 + 1),
                name: name.to_string(),
                slug: slug.to_string(),
                description: Some(description.to_string()),
                icon: Some(icon.to_string()),
                created_at: demo_time(0),
            })
            .collect();

        let mut apps = Vec::new();
        let mut versions = Vec::new();
        let mut screenshots = Vec::new();

        for (i, demo) in DEMO_APPS.iter().enumerate() {
            let app_id = demo_id(2, i as u128 + 1);
            let created_at = demo_time(10 + i as i64 * 7);
            let is_flagship = demo.slug == "superapp-pro";

            apps.push(App {
                id: app_id,
                name: demo.name.to_string(),
                slug: demo.slug.to_string(),
                description: if is_flagship {
                    SUPERAPP_DESCRIPTION.to_string()
                } else {
                    demo.short_description.to_string()
                },
                short_description: Some(demo.short_description.to_string()),
                category_id: categories
                    .iter()
                    .find(|c| c.slug == demo.category)
                    .map(|c| c.id),
                tags: if is_flagship {
                    ["productivity", "tools", "office", "work"]
                        .iter()
                        .map(|t| t.to_string())
                        .collect()
                } else {
                    vec![demo.category.to_string()]
                },
                icon_url: None,
                developer: Some("AppHub Studios".to_string()),
                website: is_flagship.then(|| "https://apphub.example.com".to_string()),
                status: demo.status,
                featured: demo.featured,
                downloads_count: demo.downloads,
                created_at,
                updated_at: created_at,
            });

            for (j, platform) in demo.platforms.iter().enumerate() {
                let (extension, size, hash, requirements) = match platform {
                    Platform::Android => ("apk", 45_000_000, "abc123", "Android 8.0 or higher"),
                    Platform::Windows => ("exe", 85_000_000, "def456", "Windows 10 or higher"),
                    Platform::Zip => ("zip", 12_500_000, "0f1e2d", "Any desktop OS"),
                };
                versions.push(AppVersion {
                    id: demo_id(3, (i as u128 + 1) * 16 + j as u128),
                    app_id,
                    version: if is_flagship { "2.5.1" } else { "1.0.0" }.to_string(),
                    platform: *platform,
                    file_url: format!("/demo/{}.{}", demo.slug, extension),
                    file_size: Some(size),
                    file_hash: Some(hash.to_string()),
                    changelog: Some("Bug fixes and performance improvements".to_string()),
                    system_requirements: Some(requirements.to_string()),
                    is_active: true,
                    created_at: created_at + Duration::days(1),
                });
            }

            if is_flagship {
                for n in 0..3 {
                    screenshots.push(AppScreenshot {
                        id: demo_id(4, n as u128 + 1),
                        app_id,
                        url: format!("/demo/screenshots/{}-{}.png", demo.slug, n + 1),
                        alt: Some(format!("{} screenshot {}", demo.name, n + 1)),
                        sort_order: n,
                        created_at,
                    });
                }
            }
        }

        Self {
            categories,
            apps,
            versions,
            screenshots,
        }
    }
}
