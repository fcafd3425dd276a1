//! Authentication routes
//!
//! Sessions are bearer tokens; `POST /api/logout` revokes the current one.

use super::AppJson;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrifit_shared::{AuthResponse, LoginRequest, RegisterRequest, User};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user))
}

/// POST /api/register
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = UserService::register(state.storage(), state.jwt(), req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = UserService::login(state.storage(), state.jwt(), req).await?;
    Ok(Json(session))
}

/// POST /api/logout
async fn logout(State(state): State<AppState>, auth: AuthUser) -> StatusCode {
    UserService::logout(state.sessions(), &auth).await;
    StatusCode::NO_CONTENT
}

/// GET /api/user
async fn current_user(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = UserService::current_user(state.storage(), auth.user_id).await?;
    Ok(Json(user))
}
