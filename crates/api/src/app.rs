use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::CatalogSource;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware, trace_id,
};
use crate::routes::{admin, apps, categories, health, search, seo, tracking};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, catalog: Arc<dyn CatalogSource>) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        catalog,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Catalog reads (v1)
    let catalog_routes = Router::new()
        .route("/api/v1/apps", get(apps::list_apps))
        .route("/api/v1/apps/featured", get(apps::featured_apps))
        .route("/api/v1/apps/:slug", get(apps::get_app))
        .route("/api/v1/apps/:slug/related", get(apps::related_apps))
        .route("/api/v1/categories", get(categories::list_categories))
        .route(
            "/api/v1/categories/:slug/apps",
            get(categories::list_category_apps),
        )
        .route("/api/v1/search", get(search::search_apps));

    // Tracking beacons
    let tracking_routes = Router::new()
        .route("/api/download", post(tracking::track_download))
        .route("/api/pageview", post(tracking::track_page_view));

    // Admin routes (require admin API key)
    let admin_routes = Router::new()
        .route("/api/v1/admin/apps/:slug", get(admin::get_app))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Health, SEO and metrics
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(catalog_routes)
        .merge(tracking_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
