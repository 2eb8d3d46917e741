//! Integration tests for the authenticated profile endpoint

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4())
}

async fn login_token(app: &common::TestApp, email: &str, payload: &str) -> String {
    app.post("/api/v1/auth/signup", payload).await;
    let token = app.verification_token_for(email).await;
    app.post(
        "/api/v1/auth/verify-email",
        &json!({ "token": token }).to_string(),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": "Secret1!" }).to_string(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_college_profile_nests_college_info() {
    let app = common::TestApp::new().await;

    let email = unique_email("profile_college");
    let token = login_token(&app, &email, &common::college_signup_payload(&email)).await;

    let (status, body) = app.get_with_token("/api/v1/users/profile", &token).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    let user = &response["data"]["user"];
    assert_eq!(user["email"], email);
    assert_eq!(user["category"], "college");
    assert_eq!(user["college_info"]["course"], "B.Tech CSE");
    assert_eq!(user["college_info"]["year_of_graduation"], 2026);
    assert!(user.get("alumni_info").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_alumni_profile_nests_alumni_info() {
    let app = common::TestApp::new().await;

    let email = unique_email("profile_alumni");
    let token = login_token(&app, &email, &common::alumni_signup_payload(&email)).await;

    let (status, body) = app.get_with_token("/api/v1/users/profile", &token).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    let user = &response["data"]["user"];
    assert_eq!(user["category"], "alumni");
    assert_eq!(user["alumni_info"]["profession"], "Architect");
    assert_eq!(user["alumni_info"]["year_passed_out"], 2015);
    assert!(user.get("college_info").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_user_deleted_after_token_issuance() {
    let app = common::TestApp::new().await;

    let email = unique_email("profile_deleted");
    let token = login_token(&app, &email, &common::college_signup_payload(&email)).await;

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app.get_with_token("/api/v1/users/profile", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["error"]["code"], "USER_NOT_FOUND");
}
