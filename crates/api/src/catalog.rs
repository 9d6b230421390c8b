//! Catalog strategy selection at startup.

use std::sync::Arc;

use domain::services::{CatalogSource, MockCatalog, UnavailableCatalog};
use persistence::db::create_lazy_pool;
use persistence::PgCatalog;
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::config::{CatalogBackend, Config};

/// Builds the catalog named by `catalog.source`.
///
/// `live` never fails startup: a missing or malformed database URL yields
/// an `UnavailableCatalog`, and an unreachable database is reported per
/// operation once requests arrive.
pub async fn init(config: &Config) -> Arc<dyn CatalogSource> {
    match config.catalog.source {
        CatalogBackend::Mock => {
            info!("Using in-memory demo catalog");
            Arc::new(MockCatalog::demo())
        }
        CatalogBackend::Live => init_live(config).await,
    }
}

async fn init_live(config: &Config) -> Arc<dyn CatalogSource> {
    if config.database.url.trim().is_empty() {
        warn!("catalog.source is live but no database URL is configured");
        return Arc::new(UnavailableCatalog::new("Database URL is not configured"));
    }

    let pool = match create_lazy_pool(&(&config.database).into()) {
        Ok(pool) => pool,
        Err(e) => {
            // The driver error can echo the URL, so only its kind is logged.
            error!(
                kind = error_kind(&e),
                "Database URL could not be parsed; catalog is unavailable"
            );
            return Arc::new(UnavailableCatalog::new("Database URL is invalid"));
        }
    };

    run_migrations(&pool).await;
    info!("Using PostgreSQL catalog");
    Arc::new(PgCatalog::new(pool))
}

/// Applies pending migrations. Failure is logged and leaves the catalog to
/// report errors per operation.
async fn run_migrations(pool: &PgPool) {
    info!("Running database migrations...");
    match sqlx::migrate!("../persistence/src/migrations").run(pool).await {
        Ok(()) => info!("Migrations completed"),
        Err(e) => error!(error = %e, "Migrations failed"),
    }
}

fn error_kind(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Configuration(_) => "configuration",
        sqlx::Error::Tls(_) => "tls",
        _ => "other",
    }
}
