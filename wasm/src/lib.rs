//! NutriFit WASM Module
//!
//! WebAssembly bindings for the offline fallback path: the browser builds
//! default plans and nutrient trends with the same code as the server.
//! Structured inputs and outputs cross the boundary as JSON strings.

use nutrifit_shared::plans::{
    default_meal_plan, default_workout_plan, DietType, FitnessGoal, FitnessLevel,
};
use nutrifit_shared::{alternatives, compute_trends, FoodEntry};
use wasm_bindgen::prelude::*;

fn parse_list(json: &str) -> Result<Vec<String>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| format!("expected a JSON array of strings: {}", e))
}

fn meal_plan_json(
    diet_type: &str,
    meals_per_day: u8,
    allergies: &str,
    health_conditions: &str,
) -> Result<String, String> {
    let diet: DietType = diet_type.parse().map_err(|e| format!("{}", e))?;
    let plan = default_meal_plan(
        diet,
        meals_per_day,
        &parse_list(allergies)?,
        &parse_list(health_conditions)?,
    )
    .map_err(|e| e.to_string())?;
    serde_json::to_string(&plan).map_err(|e| e.to_string())
}

fn workout_plan_json(goal: &str, level: &str, health_conditions: &str) -> Result<String, String> {
    let goal: FitnessGoal = goal.parse().map_err(|e| format!("{}", e))?;
    let level: FitnessLevel = level.parse().map_err(|e| format!("{}", e))?;
    let plan = default_workout_plan(goal, level, &parse_list(health_conditions)?)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&plan).map_err(|e| e.to_string())
}

fn trends_json(entries: &str) -> Result<String, String> {
    let entries: Vec<FoodEntry> =
        serde_json::from_str(entries).map_err(|e| format!("invalid food entries: {}", e))?;
    serde_json::to_string(&compute_trends(&entries)).map_err(|e| e.to_string())
}

/// Default meal plan for a diet type and meal count
///
/// `allergies` and `health_conditions` are JSON arrays of strings.
#[wasm_bindgen]
pub fn default_meal_plan_json(
    diet_type: &str,
    meals_per_day: u8,
    allergies: &str,
    health_conditions: &str,
) -> Result<String, JsError> {
    meal_plan_json(diet_type, meals_per_day, allergies, health_conditions)
        .map_err(|e| JsError::new(&e))
}

/// Default workout plan for a goal and fitness level
#[wasm_bindgen]
pub fn default_workout_plan_json(
    goal: &str,
    fitness_level: &str,
    health_conditions: &str,
) -> Result<String, JsError> {
    workout_plan_json(goal, fitness_level, health_conditions).map_err(|e| JsError::new(&e))
}

/// Nutrient averages over a JSON array of food entries
#[wasm_bindgen]
pub fn nutrient_trends_json(entries: &str) -> Result<String, JsError> {
    trends_json(entries).map_err(|e| JsError::new(&e))
}

/// Static healthier alternatives for a food name
#[wasm_bindgen]
pub fn default_alternatives_json(food_name: &str) -> String {
    serde_json::to_string(&alternatives::default_alternatives(food_name))
        .unwrap_or_else(|_| "[]".to_string())
}
