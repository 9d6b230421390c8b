//! App entities (database row mappings).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{App, AppCardData, AppStatus, CategorySummary, Platform};

/// Database row mapping for the apps table.
#[derive(Debug, Clone, FromRow)]
pub struct AppEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>, // TEXT[]
    pub icon_url: Option<String>,
    pub developer: Option<String>,
    pub website: Option<String>,
    pub status: String,
    pub featured: bool,
    pub downloads_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AppEntity> for App {
    fn from(entity: AppEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            short_description: entity.short_description,
            category_id: entity.category_id,
            tags: entity.tags,
            icon_url: entity.icon_url,
            developer: entity.developer,
            website: entity.website,
            // An unrecognized status must never leak into public listings.
            status: entity.status.parse().unwrap_or(AppStatus::Hidden),
            featured: entity.featured,
            downloads_count: entity.downloads_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row of the card listing query: app columns, the joined category and the
/// aggregated platforms of its active versions.
#[derive(Debug, Clone, FromRow)]
pub struct AppCardEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub icon_url: Option<String>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub downloads_count: i64,
    pub featured: bool,
    pub platforms: Vec<String>,
}

impl From<AppCardEntity> for AppCardData {
    fn from(entity: AppCardEntity) -> Self {
        let category = match (entity.category_name, entity.category_slug) {
            (Some(name), Some(slug)) => Some(CategorySummary { name, slug }),
            _ => None,
        };

        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            short_description: entity.short_description,
            icon_url: entity.icon_url,
            category,
            downloads_count: entity.downloads_count,
            featured: entity.featured,
            platforms: entity
                .platforms
                .iter()
                .filter_map(|p| p.parse::<Platform>().ok())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }
}
