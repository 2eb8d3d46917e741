//! User profile routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use campus_connect_shared::types::ApiEnvelope;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

/// Get the authenticated user's profile
///
/// GET /api/v1/users/profile
///
/// Requires a valid Bearer access token. The response nests
/// `college_info` or `alumni_info` depending on the user's category.
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let data = ProfileService::get_profile(state.db(), auth.user_id).await?;

    Ok(Json(ApiEnvelope::success_with_message(
        "Profile retrieved successfully",
        data,
    )))
}
