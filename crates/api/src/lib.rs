//! AppHub HTTP service: configuration, catalog selection, and the axum router.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
