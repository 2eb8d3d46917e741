//! Authentication routes
//!
//! Signup, login and email verification endpoints. Each handler maps a
//! transport request onto a workflow call and wraps the result in the
//! uniform envelope.

use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::services::{AuthService, ClientInfo};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use campus_connect_shared::types::{
    ApiEnvelope, LoginRequest, SignupRequest, VerifyEmailRequest,
};

/// Cookie carrying the refresh token: HttpOnly keeps it away from
/// scripts, SameSite=Strict blocks cross-site sends, Secure is added in
/// production so it only travels over TLS.
const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify-email", post(verify_email))
}

/// Register a new user
///
/// POST /api/v1/auth/signup
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let data = AuthService::signup(state.db(), &state.config().verification, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success_with_message(
            "Account created successfully. Please check your email for verification.",
            data,
        )),
    ))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
///
/// The access token is returned in the body; the refresh token only in
/// the Set-Cookie header.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let client = client_info(&headers);
    let outcome = AuthService::login(
        state.db(),
        state.tokens(),
        &state.config().rate_limit,
        req,
        &client,
    )
    .await?;

    let cookie = refresh_cookie(
        &outcome.refresh_token,
        state.tokens().refresh_expiry_secs(),
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiEnvelope::success_with_message(
            "Login successful",
            outcome.data,
        )),
    ))
}

/// Verify an email address from an out-of-band token
///
/// POST /api/v1/auth/verify-email
async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> ApiResult<impl IntoResponse> {
    let data = AuthService::verify_email(state.db(), &req.token).await?;

    Ok(Json(ApiEnvelope::success_with_message(
        "Email verified successfully",
        data,
    )))
}

/// Capture the caller's address and user agent for the attempt log
fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    ClientInfo {
        ip_address,
        user_agent,
    }
}

/// Build the Set-Cookie value for the refresh token
///
/// The Secure flag is omitted outside production to allow plain HTTP in
/// local development.
fn refresh_cookie(token: &str, max_age_secs: i64) -> String {
    let secure_flag = if AppConfig::is_production() {
        "; Secure"
    } else {
        ""
    };

    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}{}",
        REFRESH_COOKIE_NAME, token, max_age_secs, secure_flag
    )
}
