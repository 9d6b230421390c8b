//! Sitemap and robots.txt.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use domain::models::ListAppsQuery;
use shared::pagination::MAX_LIMIT;

use crate::app::AppState;
use crate::error::ApiError;

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Path, change frequency, priority.
const STATIC_PAGES: &[(&str, &str, f32)] = &[
    ("", "daily", 1.0),
    ("/apps", "daily", 0.9),
    ("/search", "weekly", 0.7),
    ("/about", "monthly", 0.5),
    ("/contact", "monthly", 0.5),
    ("/privacy", "monthly", 0.3),
    ("/terms", "monthly", 0.3),
    ("/dmca", "monthly", 0.3),
];

const DISALLOWED_PREFIXES: &[&str] = &["/admin/", "/api/"];

/// Static pages, then category pages, then app pages.
pub fn sitemap_entries<'a>(
    base_url: &str,
    category_slugs: impl IntoIterator<Item = &'a str>,
    app_slugs: impl IntoIterator<Item = &'a str>,
) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = STATIC_PAGES
        .iter()
        .map(|&(path, change_frequency, priority)| SitemapEntry {
            loc: format!("{}{}", base_url, path),
            change_frequency,
            priority,
        })
        .collect();

    entries.extend(category_slugs.into_iter().map(|slug| SitemapEntry {
        loc: format!("{}/category/{}", base_url, slug),
        change_frequency: "daily",
        priority: 0.8,
    }));

    entries.extend(app_slugs.into_iter().map(|slug| SitemapEntry {
        loc: format!("{}/apps/{}", base_url, slug),
        change_frequency: "weekly",
        priority: 0.9,
    }));

    entries
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_sitemap(entries: &[SitemapEntry], last_modified: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "<url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{:.1}</priority></url>\n",
            escape_xml(&entry.loc),
            last_modified,
            entry.change_frequency,
            entry.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(base_url: &str) -> String {
    let mut body = String::new();
    for agent in ["*", "Googlebot"] {
        body.push_str(&format!("User-agent: {}\nAllow: /\n", agent));
        for prefix in DISALLOWED_PREFIXES {
            body.push_str(&format!("Disallow: {}\n", prefix));
        }
        body.push('\n');
    }
    body.push_str(&format!("Sitemap: {}/sitemap.xml\n", base_url));
    body
}

/// GET /sitemap.xml
///
/// Lists up to 1000 published apps; drafts and hidden apps never appear.
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let apps_query = ListAppsQuery {
        limit: Some(MAX_LIMIT),
        ..Default::default()
    };
    let (apps, categories) = tokio::try_join!(
        state.catalog.get_published_apps(&apps_query),
        state.catalog.get_categories(),
    )?;

    let entries = sitemap_entries(
        state.config.site_url(),
        categories.iter().map(|c| c.slug.as_str()),
        apps.iter().map(|a| a.slug.as_str()),
    );
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries, &now),
    )
        .into_response())
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(state.config.site_url()),
    )
}
