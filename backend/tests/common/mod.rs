//! Common test utilities for integration tests
//!
//! This module provides shared setup and teardown for integration tests.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use campus_connect_backend::{config::AppConfig, routes, state::AppState};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Create a new test application with a real database
    pub async fn new() -> Self {
        let config = test_config();
        let pool = create_test_pool(&config.database.url).await;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a GET request with a Bearer token
    pub async fn get_with_token(&self, path: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let (status, _, body) = self.post_full(path, body).await;
        (status, body)
    }

    /// Make a POST request and keep the response headers (for cookies)
    pub async fn post_full(&self, path: &str, body: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, headers, body_str)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Fetch the stored verification token for a user, standing in for
    /// the out-of-band delivery channel
    pub async fn verification_token_for(&self, email: &str) -> String {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT evt.token
            FROM email_verification_tokens evt
            JOIN users u ON evt.user_id = u.id
            WHERE u.email = $1
            ORDER BY evt.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .expect("no verification token for user")
    }
}

/// Build a valid college signup payload for a given email
pub fn college_signup_payload(email: &str) -> String {
    json!({
        "name": "Asha Rao",
        "email": email,
        "password": "Secret1!",
        "confirmPassword": "Secret1!",
        "mobile": "9876543210",
        "gender": "female",
        "category": "college",
        "course": "B.Tech CSE",
        "graduationYear": "2026"
    })
    .to_string()
}

/// Build a valid alumni signup payload for a given email
pub fn alumni_signup_payload(email: &str) -> String {
    json!({
        "name": "Ravi Kumar",
        "email": email,
        "password": "Secret1!",
        "confirmPassword": "Secret1!",
        "mobile": "9876543210",
        "gender": "male",
        "category": "alumni",
        "profession": "Architect",
        "passedOutYear": "2015"
    })
    .to_string()
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        config.database.url = url;
    }
    config
}

async fn create_test_pool(url: &str) -> PgPool {
    PgPool::connect(url)
        .await
        .expect("Failed to connect to test database")
}
