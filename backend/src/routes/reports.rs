//! Report downloads

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ReportService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/pdf", get(pdf_report))
        .route("/food-history.csv", get(food_history_csv))
}

fn attachment(content_type: &'static str, filename: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static(filename));
    headers
}

/// GET /api/reports/pdf - full health report
async fn pdf_report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = ReportService::pdf(state.storage(), &state.config().report, auth.user_id).await?;
    Ok((
        attachment(
            "application/pdf",
            "attachment; filename=\"nutrifit-report.pdf\"",
        ),
        bytes,
    ))
}

/// GET /api/reports/food-history.csv
async fn food_history_csv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let csv = ReportService::food_history_csv(state.storage(), auth.user_id).await?;
    Ok((
        attachment(
            "text/csv",
            "attachment; filename=\"food-history.csv\"",
        ),
        csv,
    ))
}
