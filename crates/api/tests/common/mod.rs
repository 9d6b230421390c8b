//! Common test utilities for integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`
//! against the seeded `MockCatalog`, so no database is needed.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use std::sync::Arc;

use apphub_api::{
    app::create_app,
    config::{
        CatalogBackend, CatalogConfig, Config, DatabaseConfig, LoggingConfig, SecurityConfig,
        ServerConfig,
    },
};
use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use domain::services::{CatalogSource, MockCatalog};
use serde_json::Value;

/// Admin key accepted by `test_config()`.
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            site_url: "https://apphub.test/".to_string(),
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
            min_connections: 0,
            connect_timeout_secs: 1,
            idle_timeout_secs: 60,
        },
        catalog: CatalogConfig {
            source: CatalogBackend::Mock,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
            admin_api_key_hash: shared::crypto::sha256_hex(TEST_ADMIN_KEY),
            hsts_enabled: false,
        },
    }
}

/// Router over the given catalog with `test_config()`.
pub fn create_test_app(catalog: Arc<dyn CatalogSource>) -> Router {
    create_app(test_config(), catalog)
}

/// Router over a fresh demo catalog, with a handle to inspect it.
pub fn demo_app() -> (Router, MockCatalog) {
    let catalog = MockCatalog::demo();
    (create_test_app(Arc::new(catalog.clone())), catalog)
}

pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

pub async fn response_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_request_with_api_key(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("X-API-Key", api_key)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "apphub-tests/1.0")
        .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Slugs of the `apps` array in a list response.
pub fn slugs(body: &Value) -> Vec<String> {
    body["apps"]
        .as_array()
        .expect("apps array")
        .iter()
        .map(|a| a["slug"].as_str().unwrap_or_default().to_string())
        .collect()
}
