//! Custom Axum extractors.
//!
//! Extractors for parsing request data into catalog types, with rejections
//! reported as `ApiError`.

pub mod client_metadata;
pub mod request;

pub use client_metadata::{ClientMeta, COUNTRY_HEADER, REAL_IP_HEADER};
pub use request::{ApiJson, ApiQuery};
