//! Nutrient trends and dietary recommendations

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::RecommendationService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use nutrifit_shared::RecommendationsResponse;

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview))
        .route("/generate", post(generate))
}

/// GET /api/recommendations - trends plus rule-based advice
async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<RecommendationsResponse>> {
    Ok(Json(
        RecommendationService::overview(state.storage(), auth.user_id).await?,
    ))
}

/// POST /api/recommendations/generate - personalised advice from the AI
async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<RecommendationsResponse>> {
    Ok(Json(
        RecommendationService::generate(state.storage(), state.ai(), auth.user_id).await?,
    ))
}
