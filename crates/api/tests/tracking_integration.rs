//! Integration tests for the download and page view beacons.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{demo_app, get_request, json_request, parse_response_body};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_detail(app: &Router, slug: &str) -> Value {
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/apps/{}", slug)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_response_body(response).await
}

fn version_id(detail: &Value, platform: &str) -> String {
    detail["current_downloads"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["platform"] == platform)
        .and_then(|d| d["version_id"].as_str())
        .expect("version for platform")
        .to_string()
}

#[tokio::test]
async fn test_track_download_increments_count() {
    let (app, catalog) = demo_app();
    let before = app_detail(&app, "securevault").await;
    let version = version_id(&before, "android");

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": version, "platform": "android"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["id"].is_string());

    let after = app_detail(&app, "securevault").await;
    assert_eq!(
        after["downloads_count"].as_i64().unwrap(),
        before["downloads_count"].as_i64().unwrap() + 1
    );

    let downloads = catalog.recorded_downloads().await;
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(downloads[0].user_agent.as_deref(), Some("apphub-tests/1.0"));
}

#[tokio::test]
async fn test_track_download_platform_is_case_insensitive() {
    let (app, _) = demo_app();
    let detail = app_detail(&app, "mediaplayer-hd").await;
    let version = version_id(&detail, "windows");

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": version, "platform": "Windows"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_track_download_unknown_platform() {
    let (app, catalog) = demo_app();
    let detail = app_detail(&app, "superapp-pro").await;
    let version = version_id(&detail, "android");

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": version, "platform": "ios"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(catalog.recorded_downloads().await.is_empty());
}

#[tokio::test]
async fn test_track_download_platform_mismatch() {
    let (app, catalog) = demo_app();
    let detail = app_detail(&app, "filemanager-plus").await;
    let version = version_id(&detail, "android");

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": version, "platform": "windows"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(catalog.recorded_downloads().await.is_empty());
}

#[tokio::test]
async fn test_track_download_unknown_version() {
    let (app, _) = demo_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": uuid::Uuid::new_v4(), "platform": "android"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_track_download_malformed_body() {
    let (app, _) = demo_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/download",
            json!({"versionId": "not-a-uuid", "platform": "android"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_track_page_view() {
    let (app, catalog) = demo_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/pageview",
            json!({"path": "/apps"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);

    let views = catalog.recorded_page_views().await;
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].path, "/apps");
    assert!(views[0].app_id.is_none());
}

#[tokio::test]
async fn test_track_page_view_for_app() {
    let (app, catalog) = demo_app();
    let detail = app_detail(&app, "gamemaster-2024").await;
    let app_id = detail["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/pageview",
            json!({"path": "/apps/gamemaster-2024", "appId": app_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let recorded = catalog
        .recorded_page_views()
        .await
        .into_iter()
        .filter(|v| v.app_id.map(|id| id.to_string()) == Some(app_id.clone()))
        .count();
    // The detail request records its own view in the background.
    assert!(recorded >= 1);
}

#[tokio::test]
async fn test_track_page_view_blank_path() {
    let (app, catalog) = demo_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/pageview",
            json!({"path": "  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(catalog.recorded_page_views().await.is_empty());
}

#[tokio::test]
async fn test_track_page_view_unknown_app() {
    let (app, _) = demo_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/pageview",
            json!({"path": "/apps/ghost", "appId": uuid::Uuid::new_v4()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
