//! Catalog services.
//!
//! The contract and its strategies live here; the PostgreSQL strategy is
//! provided by the persistence crate.

pub mod catalog;
pub mod mock_catalog;

pub use catalog::{CatalogError, CatalogSource, SourceKind, UnavailableCatalog};
pub use mock_catalog::{CatalogSeed, MockCatalog};
