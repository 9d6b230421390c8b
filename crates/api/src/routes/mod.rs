//! HTTP route handlers.

pub mod admin;
pub mod apps;
pub mod categories;
pub mod health;
pub mod search;
pub mod seo;
pub mod tracking;
