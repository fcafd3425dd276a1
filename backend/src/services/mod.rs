//! Business logic services
//!
//! Services coordinate storage, the AI assistant and the shared domain
//! logic. They own input validation and the ownership checks that storage
//! does not do.

pub mod chat;
pub mod food;
pub mod meal_plan;
pub mod recommendations;
pub mod report;
pub mod user;
pub mod waitlist;
pub mod workout_plan;

pub use chat::ChatService;
pub use food::FoodService;
pub use meal_plan::MealPlanService;
pub use recommendations::RecommendationService;
pub use report::ReportService;
pub use user::UserService;
pub use waitlist::WaitlistService;
pub use workout_plan::WorkoutPlanService;

use crate::error::ApiError;
use nutrifit_shared::Id;

/// Resolve a looked-up record for `user_id`: missing is 404, someone
/// else's is 403
pub(crate) fn owned_by<T>(
    record: Option<T>,
    user_id: Id,
    owner: impl FnOnce(&T) -> Id,
    what: &str,
) -> Result<T, ApiError> {
    let record = record.ok_or_else(|| ApiError::NotFound(format!("{} not found", what)))?;
    if owner(&record) != user_id {
        return Err(ApiError::Forbidden(format!(
            "{} belongs to another user",
            what
        )));
    }
    Ok(record)
}
