//! AI assistant
//!
//! [`ChatCompletion`] is the seam to the language model; [`OpenAiClient`]
//! implements it against the chat completions API and
//! [`DisabledCompletion`] stands in when no API key is configured.
//!
//! [`AiAssistant`] builds the prompts for each NutriFit operation and turns
//! the model's JSON answer into domain types. Answers are trusted loosely:
//! missing or malformed fields default to zero / empty, but an answer that is
//! not a JSON object at all is an [`AiError::InvalidResponse`].

mod openai;
pub mod prompts;

pub use openai::OpenAiClient;

use crate::config::AiConfig;
use async_trait::async_trait;
use nutrifit_shared::nutrients::{lenient_f64, nutrients_from_value, NutrientTrends};
use nutrifit_shared::plans::{
    DietType, FitnessGoal, FitnessLevel, MealPlanContent, WorkoutPlanContent,
};
use nutrifit_shared::{ChatTurn, FoodAlternative, Nutrients, Priority, Recommendation};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Chat turns forwarded to the model
pub const MAX_CHAT_HISTORY: usize = 20;

/// AI failures
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI is disabled")]
    Disabled,

    #[error("AI request failed: {0}")]
    Transport(String),

    #[error("AI API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI response was not usable: {0}")]
    InvalidResponse(String),
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Message body: plain text, or text plus an image
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    TextWithImage { text: String, image_url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::TextWithImage {
                text: text.into(),
                image_url: image_url.into(),
            },
        }
    }
}

/// A single completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Ask the model for a JSON object
    pub json: bool,
    pub max_tokens: Option<u32>,
}

/// Language model backend
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Return the assistant's reply text
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Backend used when AI is switched off or no API key is set
pub struct DisabledCompletion;

#[async_trait]
impl ChatCompletion for DisabledCompletion {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
        Err(AiError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Nutrition estimate for a food photo
#[derive(Debug, Clone, PartialEq)]
pub struct FoodAnalysis {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub nutrients: Nutrients,
    pub alternatives: Vec<FoodAlternative>,
}

/// AI-generated meal plan
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMealPlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub calories: i32,
    pub content: MealPlanContent,
}

/// AI-generated workout plan
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWorkoutPlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub calories_burned: i32,
    pub content: WorkoutPlanContent,
}

/// Extract the JSON object from a model reply
///
/// Tolerates markdown code fences and prose around the object.
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>, AiError> {
    let trimmed = text.trim();
    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => {
            return Err(AiError::InvalidResponse(
                "reply does not contain a JSON object".to_string(),
            ))
        }
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AiError::InvalidResponse("reply is not a JSON object".to_string())),
        Err(e) => Err(AiError::InvalidResponse(e.to_string())),
    }
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .map(|k| obj.get(*k))
        .find(|v| v.is_some())
        .map(lenient_f64)
        .unwrap_or(0.0)
}

fn alternatives_from(value: Option<&Value>) -> Vec<FoodAlternative> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) if !name.trim().is_empty() => Some(FoodAlternative {
                name: name.trim().to_string(),
                reason: String::new(),
                calories: None,
            }),
            Value::Object(obj) => {
                let name = string_field(obj, &["name", "food", "foodName"])?;
                let calories = obj.get("calories").map(|v| lenient_f64(Some(v)));
                Some(FoodAlternative {
                    name,
                    reason: string_field(obj, &["reason", "benefit", "description"])
                        .unwrap_or_default(),
                    calories,
                })
            }
            _ => None,
        })
        .collect()
}

fn priority_from(value: Option<&Value>) -> Priority {
    match value.and_then(Value::as_str).map(|s| s.to_ascii_lowercase()) {
        Some(p) if p == "high" => Priority::High,
        Some(p) if p == "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Normalize a food analysis reply
pub fn food_analysis_from(obj: &Map<String, Value>) -> Result<FoodAnalysis, AiError> {
    let food_name = string_field(obj, &["foodName", "food_name", "name", "food"])
        .ok_or_else(|| AiError::InvalidResponse("no food was identified".to_string()))?;

    Ok(FoodAnalysis {
        food_name,
        calories: number_field(obj, &["calories", "kcal"]),
        protein: number_field(obj, &["protein"]),
        carbs: number_field(obj, &["carbs", "carbohydrates"]),
        fats: number_field(obj, &["fats", "fat"]),
        nutrients: nutrients_from_value(obj.get("nutrients")),
        alternatives: alternatives_from(obj.get("alternatives")),
    })
}

/// Normalize a meal plan reply; a plan without meals is unusable
pub fn meal_plan_from(obj: &Map<String, Value>) -> Result<GeneratedMealPlan, AiError> {
    let meals = obj
        .get("meals")
        .or_else(|| obj.get("mealPlan"))
        .cloned()
        .unwrap_or(Value::Null);
    let content: MealPlanContent = serde_json::from_value(meals)
        .map_err(|e| AiError::InvalidResponse(format!("meals: {}", e)))?;
    if content.meals().all(|m| m.name.trim().is_empty()) {
        return Err(AiError::InvalidResponse("plan contains no meals".to_string()));
    }

    let stated = number_field(obj, &["calories", "totalCalories"]).round() as i32;
    let calories = if stated > 0 { stated } else { content.total_calories() };

    Ok(GeneratedMealPlan {
        name: string_field(obj, &["name", "title"]),
        description: string_field(obj, &["description", "summary"]),
        calories,
        content,
    })
}

/// Normalize a workout plan reply; a plan without exercises is unusable
pub fn workout_plan_from(obj: &Map<String, Value>) -> Result<GeneratedWorkoutPlan, AiError> {
    let exercises = obj
        .get("exercises")
        .or_else(|| obj.get("workout"))
        .cloned()
        .unwrap_or(Value::Null);
    let content: WorkoutPlanContent = serde_json::from_value(exercises)
        .map_err(|e| AiError::InvalidResponse(format!("exercises: {}", e)))?;
    if content.is_empty() {
        return Err(AiError::InvalidResponse("plan contains no exercises".to_string()));
    }

    Ok(GeneratedWorkoutPlan {
        name: string_field(obj, &["name", "title"]),
        description: string_field(obj, &["description", "summary"]),
        calories_burned: number_field(obj, &["caloriesBurned", "calories_burned", "calories"])
            .round() as i32,
        content,
    })
}

/// Normalize a recommendations reply
pub fn recommendations_from(obj: &Map<String, Value>) -> Result<Vec<Recommendation>, AiError> {
    let Some(Value::Array(items)) = obj.get("recommendations") else {
        return Err(AiError::InvalidResponse("missing recommendations".to_string()));
    };
    let recommendations: Vec<Recommendation> = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let message = string_field(item, &["message", "description", "text"])?;
            Some(Recommendation {
                category: string_field(item, &["category", "type"])
                    .unwrap_or_else(|| "general".to_string()),
                title: string_field(item, &["title"]).unwrap_or_else(|| "Recommendation".to_string()),
                message,
                priority: priority_from(item.get("priority")),
            })
        })
        .collect();

    if recommendations.is_empty() {
        return Err(AiError::InvalidResponse("no recommendations given".to_string()));
    }
    Ok(recommendations)
}

/// NutriFit operations on top of a [`ChatCompletion`] backend
#[derive(Clone)]
pub struct AiAssistant {
    backend: Arc<dyn ChatCompletion>,
}

impl AiAssistant {
    pub fn new(backend: Arc<dyn ChatCompletion>) -> Self {
        Self { backend }
    }

    /// Assistant that fails every call with [`AiError::Disabled`]
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledCompletion))
    }

    /// Build from configuration; without an API key AI stays disabled
    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        match &config.api_key {
            Some(key) => Ok(Self::new(Arc::new(OpenAiClient::new(config, key.clone())?))),
            None => {
                warn!("AI is enabled but no API key is configured; AI features are disabled");
                Ok(Self::disabled())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_enabled()
    }

    async fn call(&self, operation: &'static str, request: CompletionRequest) -> Result<String, AiError> {
        let result = self.backend.complete(request).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(AiError::Disabled) => "disabled",
            Err(_) => "error",
        };
        metrics::counter!(
            "nutrifit_ai_requests_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        result
    }

    async fn call_json(
        &self,
        operation: &'static str,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<Map<String, Value>, AiError> {
        let reply = self
            .call(
                operation,
                CompletionRequest {
                    messages,
                    json: true,
                    max_tokens: Some(max_tokens),
                },
            )
            .await?;
        debug!(operation, reply_len = reply.len(), "AI reply received");
        parse_json_object(&reply)
    }

    /// Estimate nutrition for an image given as a `data:` URL
    pub async fn analyze_food(&self, image_data_url: &str) -> Result<FoodAnalysis, AiError> {
        let obj = self
            .call_json(
                "analyze_food",
                vec![
                    ChatMessage::system(prompts::FOOD_ANALYSIS_SYSTEM),
                    ChatMessage::user_with_image(prompts::FOOD_ANALYSIS_USER, image_data_url),
                ],
                1000,
            )
            .await?;
        food_analysis_from(&obj)
    }

    pub async fn suggest_alternatives(
        &self,
        food_name: &str,
        goal: Option<&str>,
    ) -> Result<Vec<FoodAlternative>, AiError> {
        let obj = self
            .call_json(
                "alternatives",
                vec![
                    ChatMessage::system(prompts::ALTERNATIVES_SYSTEM),
                    ChatMessage::user(prompts::alternatives_user(food_name, goal)),
                ],
                600,
            )
            .await?;
        let alternatives = alternatives_from(obj.get("alternatives"));
        if alternatives.is_empty() {
            return Err(AiError::InvalidResponse("no alternatives given".to_string()));
        }
        Ok(alternatives)
    }

    pub async fn generate_meal_plan(
        &self,
        diet: DietType,
        meals_per_day: u8,
        calorie_target: Option<i32>,
        allergies: &[String],
        health_conditions: &[String],
    ) -> Result<GeneratedMealPlan, AiError> {
        let obj = self
            .call_json(
                "meal_plan",
                vec![
                    ChatMessage::system(prompts::MEAL_PLAN_SYSTEM),
                    ChatMessage::user(prompts::meal_plan_user(
                        diet,
                        meals_per_day,
                        calorie_target,
                        allergies,
                        health_conditions,
                    )),
                ],
                2500,
            )
            .await?;
        meal_plan_from(&obj)
    }

    pub async fn generate_workout_plan(
        &self,
        goal: FitnessGoal,
        level: FitnessLevel,
        duration_minutes: Option<u32>,
        health_conditions: &[String],
    ) -> Result<GeneratedWorkoutPlan, AiError> {
        let obj = self
            .call_json(
                "workout_plan",
                vec![
                    ChatMessage::system(prompts::WORKOUT_PLAN_SYSTEM),
                    ChatMessage::user(prompts::workout_plan_user(
                        goal,
                        level,
                        duration_minutes,
                        health_conditions,
                    )),
                ],
                2000,
            )
            .await?;
        workout_plan_from(&obj)
    }

    pub async fn recommendations(
        &self,
        trends: &NutrientTrends,
    ) -> Result<Vec<Recommendation>, AiError> {
        let obj = self
            .call_json(
                "recommendations",
                vec![
                    ChatMessage::system(prompts::RECOMMENDATIONS_SYSTEM),
                    ChatMessage::user(prompts::recommendations_user(trends)),
                ],
                1200,
            )
            .await?;
        recommendations_from(&obj)
    }

    /// Free-form chat; only the last [`MAX_CHAT_HISTORY`] turns are sent
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, AiError> {
        let skip = history.len().saturating_sub(MAX_CHAT_HISTORY);
        let mut messages = vec![ChatMessage::system(prompts::CHAT_SYSTEM)];
        messages.extend(history.iter().skip(skip).filter_map(|turn| {
            match turn.role.to_ascii_lowercase().as_str() {
                "user" => Some(ChatMessage::user(turn.content.clone())),
                "assistant" => Some(ChatMessage::assistant(turn.content.clone())),
                _ => None,
            }
        }));
        messages.push(ChatMessage::user(message));

        let reply = self
            .call(
                "chat",
                CompletionRequest {
                    messages,
                    json: false,
                    max_tokens: Some(800),
                },
            )
            .await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AiError::InvalidResponse("empty reply".to_string()));
        }
        Ok(reply.to_string())
    }
}
