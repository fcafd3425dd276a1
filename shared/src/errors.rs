//! Error types for the NutriFit domain logic

use thiserror::Error;

/// Errors raised while selecting a default plan from the catalogue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown diet type: {0}")]
    UnknownDietType(String),

    #[error("Unsupported meals per day: {0} (expected 3, 4 or 5)")]
    UnsupportedMealsPerDay(u8),

    #[error("Unknown fitness goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown fitness level: {0}")]
    UnknownFitnessLevel(String),
}
