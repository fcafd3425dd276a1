//! Default meal and workout plans
//!
//! When AI generation is unavailable, plans come from a static catalogue:
//! meals are selected by diet type x meals per day, workouts by goal x
//! fitness level. The selected plan is then adjusted for the user's
//! allergies and health conditions by [`substitution`].

pub mod meals;
pub mod substitution;
pub mod workouts;

use crate::errors::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use meals::default_meal_plan;
pub use workouts::default_workout_plan;

/// Lowercase and collapse separators so "High Protein", "high_protein" and
/// "high-protein" compare equal
fn selector_key(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// Supported diet types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Balanced,
    Vegetarian,
    Vegan,
    Keto,
    HighProtein,
}

impl DietType {
    pub const ALL: [DietType; 5] = [
        DietType::Balanced,
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::Keto,
        DietType::HighProtein,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DietType::Balanced => "Balanced",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
            DietType::Keto => "Keto",
            DietType::HighProtein => "High-Protein",
        }
    }
}

impl FromStr for DietType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match selector_key(s).as_str() {
            "balanced" | "standard" => Ok(DietType::Balanced),
            "vegetarian" => Ok(DietType::Vegetarian),
            "vegan" => Ok(DietType::Vegan),
            "keto" | "ketogenic" => Ok(DietType::Keto),
            "high-protein" | "highprotein" => Ok(DietType::HighProtein),
            _ => Err(PlanError::UnknownDietType(s.to_string())),
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supported training goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    GeneralFitness,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::GeneralFitness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::GeneralFitness => "General Fitness",
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match selector_key(s).as_str() {
            "weight-loss" | "lose-weight" | "fat-loss" => Ok(FitnessGoal::WeightLoss),
            "muscle-gain" | "build-muscle" | "strength" => Ok(FitnessGoal::MuscleGain),
            "endurance" | "cardio" => Ok(FitnessGoal::Endurance),
            "general-fitness" | "general" | "maintenance" => Ok(FitnessGoal::GeneralFitness),
            _ => Err(PlanError::UnknownGoal(s.to_string())),
        }
    }
}

/// Training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    /// Column in the per-level catalogue tables
    pub(crate) fn index(&self) -> usize {
        match self {
            FitnessLevel::Beginner => 0,
            FitnessLevel::Intermediate => 1,
            FitnessLevel::Advanced => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match selector_key(s).as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            _ => Err(PlanError::UnknownFitnessLevel(s.to_string())),
        }
    }
}

/// A single meal with its recipe and macros
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub emoji: String,
    pub ingredients: Vec<String>,
    pub preparation: String,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

/// Meals for one day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MealPlanContent {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Meal>,
}

impl MealPlanContent {
    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .chain(self.snacks.iter())
    }

    pub fn meals_mut(&mut self) -> impl Iterator<Item = &mut Meal> {
        [&mut self.breakfast, &mut self.lunch, &mut self.dinner]
            .into_iter()
            .chain(self.snacks.iter_mut())
    }

    pub fn total_calories(&self) -> i32 {
        self.meals().map(|m| m.calories).sum()
    }
}

/// A single exercise prescription
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
}

/// One session split into warmup, main block and cooldown
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkoutPlanContent {
    pub warmup: Vec<Exercise>,
    pub main: Vec<Exercise>,
    pub cooldown: Vec<Exercise>,
}

impl WorkoutPlanContent {
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.warmup
            .iter()
            .chain(self.main.iter())
            .chain(self.cooldown.iter())
    }

    pub fn exercises_mut(&mut self) -> impl Iterator<Item = &mut Exercise> {
        self.warmup
            .iter_mut()
            .chain(self.main.iter_mut())
            .chain(self.cooldown.iter_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.exercises().next().is_none()
    }
}

/// Catalogue meal plan, ready to store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultMealPlan {
    pub name: String,
    pub description: String,
    pub calories: i32,
    #[serde(rename = "meals")]
    pub content: MealPlanContent,
}

/// Catalogue workout plan, ready to store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultWorkoutPlan {
    pub name: String,
    pub description: String,
    pub calories_burned: i32,
    #[serde(rename = "exercises")]
    pub content: WorkoutPlanContent,
}
