//! Nutrition assistant chat

use super::AppJson;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ChatService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use nutrifit_shared::{ChatRequest, ChatResponse};

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

/// POST /api/chat
async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    Ok(Json(ChatService::reply(state.ai(), auth.user_id, req).await?))
}
