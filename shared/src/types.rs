//! API request and response types

use crate::models::{FoodEntry, MealPlan, User, WorkoutPlan};
use crate::nutrients::NutrientTrends;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session issued on register / login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Waitlist signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistRequest {
    pub email: String,
}

// ============================================================================
// Food Analysis Types
// ============================================================================

/// Healthier alternative to an analyzed food
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodAlternative {
    pub name: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

/// Result of analyzing an uploaded food photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeFoodResponse {
    pub entry: FoodEntry,
    pub alternatives: Vec<FoodAlternative>,
}

/// Request for healthier alternatives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesRequest {
    pub food_name: String,
    #[serde(default)]
    pub goal: Option<String>,
}

/// Alternatives response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativesResponse {
    pub alternatives: Vec<FoodAlternative>,
    pub source: ContentSource,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Where generated content came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Ai,
    Default,
}

/// Meal plan generation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub diet_type: String,
    pub meals_per_day: u8,
    #[serde(default)]
    pub calorie_target: Option<i32>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
}

/// Workout plan generation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub goal: String,
    pub fitness_level: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
}

/// Stored meal plan together with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanResponse {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub source: ContentSource,
}

/// Stored workout plan together with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub source: ContentSource,
}

// ============================================================================
// Recommendation Types
// ============================================================================

/// Recommendation priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single dietary recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub category: String,
    pub title: String,
    pub message: String,
    pub priority: Priority,
}

/// Nutrient trends plus derived recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub trends: NutrientTrends,
    pub recommendations: Vec<Recommendation>,
    pub source: ContentSource,
}

// ============================================================================
// Chat Types
// ============================================================================

/// One prior turn of a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Chat reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_plan_request_defaults() {
        let req: MealPlanRequest =
            serde_json::from_str(r#"{"dietType": "vegan", "mealsPerDay": 4}"#).unwrap();
        assert_eq!(req.diet_type, "vegan");
        assert_eq!(req.meals_per_day, 4);
        assert!(req.allergies.is_empty());
        assert!(req.calorie_target.is_none());
    }

    #[test]
    fn test_content_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ContentSource::Ai).unwrap(), "\"ai\"");
        assert_eq!(
            serde_json::to_string(&ContentSource::Default).unwrap(),
            "\"default\""
        );
    }
}
