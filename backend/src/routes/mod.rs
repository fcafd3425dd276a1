//! Route definitions for the NutriFit API
//!
//! All application routes live under `/api`; health probes and the
//! Prometheus endpoint sit at the root.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequest, FromRequestParts, State},
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod chat;
mod food;
mod health;
mod meal_plans;
mod recommendations;
mod reports;
mod waitlist;
mod workout_plans;

#[cfg(test)]
mod auth_tests;

/// JSON body whose rejections use the API error format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameters whose rejections use the API error format
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);
    let max_image_bytes = state.config().upload.max_image_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics))
        .nest("/api", api_routes(max_image_bytes))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth::auth_routes())
        .nest("/waitlist", waitlist::waitlist_routes())
        .nest("/food", food::food_routes(max_image_bytes))
        .nest("/meal-plans", meal_plans::meal_plan_routes())
        .nest("/workout-plans", workout_plans::workout_plan_routes())
        .nest("/recommendations", recommendations::recommendation_routes())
        .nest("/chat", chat::chat_routes())
        .nest("/reports", reports::report_routes())
}

/// GET /metrics - Prometheus text exposition
async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
