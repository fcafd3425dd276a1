//! Public waitlist signup

use super::AppJson;
use crate::error::ApiResult;
use crate::services::WaitlistService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use nutrifit_shared::{WaitlistRequest, WaitlistUser};

pub fn waitlist_routes() -> Router<AppState> {
    Router::new().route("/", post(join))
}

/// POST /api/waitlist
async fn join(
    State(state): State<AppState>,
    AppJson(req): AppJson<WaitlistRequest>,
) -> ApiResult<(StatusCode, Json<WaitlistUser>)> {
    let entry = WaitlistService::join(state.storage(), &req.email).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
