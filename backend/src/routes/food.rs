//! Food analysis and history routes

use super::{AppJson, AppPath};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::food::ImageUpload;
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrifit_shared::{AlternativesRequest, AlternativesResponse, AnalyzeFoodResponse, FoodEntry, Id};

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn food_routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/analyze",
            post(analyze).layer(DefaultBodyLimit::max(max_image_bytes + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/history", get(history))
        .route("/alternatives", post(alternatives))
        .route("/:id", get(get_entry).delete(delete_entry))
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Image upload is too large".to_string())
    } else {
        ApiError::BadRequest(format!("Invalid upload: {}", e.body_text()))
    }
}

/// First `image` (or `file`) field of the form
async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if matches!(field.name(), Some("image") | Some("file")) {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            return Ok(ImageUpload {
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }
    Err(ApiError::BadRequest("No image uploaded".to_string()))
}

/// POST /api/food/analyze - multipart upload of a food photo
async fn analyze(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<AnalyzeFoodResponse>)> {
    let image = read_image(&mut multipart).await?;
    let response = FoodService::analyze(
        state.storage(),
        state.ai(),
        auth.user_id,
        image,
        state.config().upload.max_image_bytes,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/food/history - newest first
async fn history(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<FoodEntry>>> {
    Ok(Json(FoodService::history(state.storage(), auth.user_id).await?))
}

/// POST /api/food/alternatives
async fn alternatives(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(req): AppJson<AlternativesRequest>,
) -> ApiResult<Json<AlternativesResponse>> {
    Ok(Json(FoodService::alternatives(state.ai(), req).await?))
}

/// GET /api/food/:id
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<Json<FoodEntry>> {
    Ok(Json(FoodService::get(state.storage(), auth.user_id, id).await?))
}

/// DELETE /api/food/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<Id>,
) -> ApiResult<StatusCode> {
    FoodService::delete(state.storage(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
