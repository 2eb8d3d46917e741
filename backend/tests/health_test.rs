//! Integration tests for health endpoints

mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_endpoint() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["status"], "healthy");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_reports_database() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["status"], "ready");
    assert_eq!(response["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_liveness() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/live").await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["status"], "alive");
}
