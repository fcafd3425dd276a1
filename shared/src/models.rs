//! Data models for the NutriFit application
//!
//! Every record carries an integer id assigned by the storage layer and,
//! except for waitlist entries, the id of the owning user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Storage-assigned record identifier
pub type Id = i64;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in reports and greetings
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Input for creating a user; `password` is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
    pub profile_pic: Option<String>,
}

/// Micronutrient breakdown of a food entry
///
/// Vitamin and mineral names are kept as reported (e.g. "Vitamin C",
/// "iron"); aggregation normalizes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nutrients {
    #[serde(default)]
    pub vitamins: BTreeMap<String, f64>,
    #[serde(default)]
    pub minerals: BTreeMap<String, f64>,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
}

/// A logged / analyzed meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: Id,
    pub user_id: Id,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default)]
    pub nutrients: Nutrients,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a food entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodEntry {
    pub user_id: Id,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub nutrients: Nutrients,
    pub image_url: Option<String>,
}

/// Named bundle of meals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub meals: Value,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a meal plan
#[derive(Debug, Clone)]
pub struct NewMealPlan {
    pub user_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub meals: Value,
}

/// Named bundle of exercises
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Value,
    pub calories_burned: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a workout plan
#[derive(Debug, Clone)]
pub struct NewWorkoutPlan {
    pub user_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Value,
    pub calories_burned: i32,
}

/// Pre-launch email signup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistUser {
    pub id: Id,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: None,
            password: "$argon2id$secret".to_string(),
            profile_pic: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User {
            id: 1,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            full_name: Some("  ".to_string()),
            password: String::new(),
            profile_pic: None,
            created_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "bob");

        user.full_name = Some("Bob Smith".to_string());
        assert_eq!(user.display_name(), "Bob Smith");
    }

    #[test]
    fn test_nutrients_missing_fields_default() {
        let nutrients: Nutrients = serde_json::from_str(r#"{"fiber": 3.5}"#).unwrap();
        assert_eq!(nutrients.fiber, 3.5);
        assert_eq!(nutrients.sugar, 0.0);
        assert!(nutrients.vitamins.is_empty());
    }
}
