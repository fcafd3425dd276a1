//! Workout plan routes

use super::{AppJson, AppPath};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WorkoutPlanService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrifit_shared::plans::DefaultWorkoutPlan;
use nutrifit_shared::{Id, WorkoutPlan, WorkoutPlanRequest, WorkoutPlanResponse};

pub fn workout_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/default", post(default_plan))
        .route("/:id", get(get_plan).delete(delete_plan))
}

/// GET /api/workout-plans
async fn list_plans(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<WorkoutPlan>>> {
    Ok(Json(WorkoutPlanService::list(state.storage(), auth.user_id).await?))
}

/// POST /api/workout-plans - generate and store a session
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<WorkoutPlanRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutPlanResponse>)> {
    let plan = WorkoutPlanService::create(state.storage(), state.ai(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/workout-plans/default - catalogue session, not stored
async fn default_plan(
    _auth: AuthUser,
    AppJson(req): AppJson<WorkoutPlanRequest>,
) -> ApiResult<Json<DefaultWorkoutPlan>> {
    Ok(Json(WorkoutPlanService::default_plan(&req)?))
}

/// GET /api/workout-plans/:id
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<Json<WorkoutPlan>> {
    Ok(Json(WorkoutPlanService::get(state.storage(), auth.user_id, id).await?))
}

/// DELETE /api/workout-plans/:id
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<StatusCode> {
    WorkoutPlanService::delete(state.storage(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
