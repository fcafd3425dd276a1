//! Meal plan routes

use super::{AppJson, AppPath};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MealPlanService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrifit_shared::plans::DefaultMealPlan;
use nutrifit_shared::{Id, MealPlan, MealPlanRequest, MealPlanResponse};

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/default", post(default_plan))
        .route("/:id", get(get_plan).delete(delete_plan))
}

/// GET /api/meal-plans
async fn list_plans(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<MealPlan>>> {
    Ok(Json(MealPlanService::list(state.storage(), auth.user_id).await?))
}

/// POST /api/meal-plans - generate and store a plan
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<MealPlanRequest>,
) -> ApiResult<(StatusCode, Json<MealPlanResponse>)> {
    let plan = MealPlanService::create(state.storage(), state.ai(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/meal-plans/default - catalogue plan, not stored
async fn default_plan(
    _auth: AuthUser,
    AppJson(req): AppJson<MealPlanRequest>,
) -> ApiResult<Json<DefaultMealPlan>> {
    Ok(Json(MealPlanService::default_plan(&req)?))
}

/// GET /api/meal-plans/:id
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<Json<MealPlan>> {
    Ok(Json(MealPlanService::get(state.storage(), auth.user_id, id).await?))
}

/// DELETE /api/meal-plans/:id
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<StatusCode> {
    MealPlanService::delete(state.storage(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
