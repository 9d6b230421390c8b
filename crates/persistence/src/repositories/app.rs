//! App repository for database operations.

use shared::pagination::Window;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AppCardEntity, AppEntity};
use crate::metrics::QueryTimer;

/// Filters for the published card listing. `None` disables a filter.
#[derive(Debug, Clone, Default)]
pub struct AppListFilter<'a> {
    pub category_slug: Option<&'a str>,
    /// Raw search term; escaped before it reaches `ILIKE`.
    pub search: Option<&'a str>,
    pub featured: Option<bool>,
}

/// Escapes `ILIKE` metacharacters so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Repository for app reads.
#[derive(Clone)]
pub struct AppRepository {
    pool: PgPool,
}

impl AppRepository {
    /// Creates a new AppRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published apps as card rows in listing order.
    ///
    /// Category and platforms are resolved in the same statement.
    pub async fn list_published_cards(
        &self,
        filter: &AppListFilter<'_>,
        window: Window,
    ) -> Result<Vec<AppCardEntity>, sqlx::Error> {
        let pattern = filter.search.map(|term| format!("%{}%", escape_like(term)));

        let timer = QueryTimer::new("list_published_app_cards");
        let result = sqlx::query_as::<_, AppCardEntity>(
            r#"
            SELECT a.id, a.name, a.slug, a.short_description, a.icon_url,
                   c.name AS category_name, c.slug AS category_slug,
                   a.downloads_count, a.featured,
                   ARRAY(
                       SELECT DISTINCT v.platform FROM app_versions v
                       WHERE v.app_id = a.id AND v.is_active
                       ORDER BY v.platform
                   ) AS platforms
            FROM apps a
            LEFT JOIN categories c ON c.id = a.category_id
            WHERE a.status = 'published'
              AND ($1::text IS NULL OR c.slug = $1)
              AND ($2::text IS NULL
                   OR a.name ILIKE $2 ESCAPE '\'
                   OR a.short_description ILIKE $2 ESCAPE '\')
              AND ($3::boolean IS NULL OR a.featured = $3)
            ORDER BY a.featured DESC, a.created_at DESC, a.id ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.category_slug)
        .bind(pattern)
        .bind(filter.featured)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Published apps other than `app_id`, most downloaded first.
    pub async fn list_related_cards(
        &self,
        app_id: Uuid,
        category_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<AppCardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_related_app_cards");
        let result = sqlx::query_as::<_, AppCardEntity>(
            r#"
            SELECT a.id, a.name, a.slug, a.short_description, a.icon_url,
                   c.name AS category_name, c.slug AS category_slug,
                   a.downloads_count, a.featured,
                   ARRAY(
                       SELECT DISTINCT v.platform FROM app_versions v
                       WHERE v.app_id = a.id AND v.is_active
                       ORDER BY v.platform
                   ) AS platforms
            FROM apps a
            LEFT JOIN categories c ON c.id = a.category_id
            WHERE a.status = 'published'
              AND a.id <> $1
              AND ($2::uuid IS NULL OR a.category_id = $2)
            ORDER BY a.downloads_count DESC, a.created_at DESC, a.id ASC
            LIMIT $3
            "#,
        )
        .bind(app_id)
        .bind(category_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find an app by exact slug.
    ///
    /// Unless `include_unpublished` is set, drafts and hidden apps are
    /// filtered out in SQL.
    pub async fn find_by_slug(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> Result<Option<AppEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_app_by_slug");
        let result = sqlx::query_as::<_, AppEntity>(
            r#"
            SELECT id, name, slug, description, short_description, category_id, tags,
                   icon_url, developer, website, status, featured, downloads_count,
                   created_at, updated_at
            FROM apps
            WHERE slug = $1 AND ($2 OR status = 'published')
            "#,
        )
        .bind(slug)
        .bind(include_unpublished)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}
