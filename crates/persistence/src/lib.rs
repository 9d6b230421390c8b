//! Persistence layer for the AppHub catalog.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - `PgCatalog`, the PostgreSQL catalog strategy

pub mod catalog;
pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

pub use catalog::PgCatalog;
