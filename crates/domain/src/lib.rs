//! Domain layer for the AppHub catalog.
//!
//! This crate contains:
//! - Catalog models (App, Category, AppVersion, tracking events)
//! - The `CatalogSource` contract and its in-memory strategies
//! - Catalog error types

pub mod models;
pub mod services;
