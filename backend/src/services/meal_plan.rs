//! Meal plan generation and storage
//!
//! Plans come from the AI when it is available and from the default
//! catalogue otherwise. Allergy and health-condition substitution is applied
//! to both.

use super::owned_by;
use crate::ai::AiAssistant;
use crate::error::ApiError;
use crate::storage::Storage;
use nutrifit_shared::plans::{default_meal_plan, substitution, DefaultMealPlan, DietType};
use nutrifit_shared::validation::{self, field};
use nutrifit_shared::{
    ContentSource, Id, MealPlan, MealPlanRequest, MealPlanResponse, NewMealPlan, PlanError,
};
use tracing::{info, warn};

/// Parsed and validated preferences
struct Preferences {
    diet: DietType,
    meals_per_day: u8,
}

fn preferences(req: &MealPlanRequest) -> Result<Preferences, ApiError> {
    let diet: DietType = req.diet_type.parse()?;
    if !(3..=5).contains(&req.meals_per_day) {
        return Err(PlanError::UnsupportedMealsPerDay(req.meals_per_day).into());
    }
    if let Some(target) = req.calorie_target {
        field("calorieTarget", || validation::validate_calorie_target(target))?;
    }
    Ok(Preferences {
        diet,
        meals_per_day: req.meals_per_day,
    })
}

fn custom_name(req: &MealPlanRequest) -> Option<String> {
    req.name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

pub struct MealPlanService;

impl MealPlanService {
    /// Default catalogue plan for `req`, not stored
    pub fn default_plan(req: &MealPlanRequest) -> Result<DefaultMealPlan, ApiError> {
        let prefs = preferences(req)?;
        let mut plan = default_meal_plan(
            prefs.diet,
            prefs.meals_per_day,
            &req.allergies,
            &req.health_conditions,
        )?;
        if let Some(name) = custom_name(req) {
            plan.name = name;
        }
        Ok(plan)
    }

    /// Generate a plan (AI first, catalogue as fallback) and store it
    pub async fn create(
        storage: &dyn Storage,
        ai: &AiAssistant,
        user_id: Id,
        req: MealPlanRequest,
    ) -> Result<MealPlanResponse, ApiError> {
        let prefs = preferences(&req)?;

        let mut generated = None;
        if ai.is_enabled() {
            match ai
                .generate_meal_plan(
                    prefs.diet,
                    prefs.meals_per_day,
                    req.calorie_target,
                    &req.allergies,
                    &req.health_conditions,
                )
                .await
            {
                Ok(mut plan) => {
                    let substitutions =
                        substitution::for_meal_plan(&req.allergies, &req.health_conditions);
                    substitution::apply_to_meals(&mut plan.content, &substitutions);
                    generated = Some(DefaultMealPlan {
                        name: plan
                            .name
                            .unwrap_or_else(|| format!("{} Meal Plan", prefs.diet.label())),
                        description: plan.description.unwrap_or_default(),
                        calories: plan.calories,
                        content: plan.content,
                    });
                }
                Err(e) => warn!(error = %e, user_id, "AI meal plan failed, using default plan"),
            }
        }

        let (plan, source) = match generated {
            Some(plan) => (plan, ContentSource::Ai),
            None => (Self::default_plan(&req)?, ContentSource::Default),
        };

        let meals = serde_json::to_value(&plan.content)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to encode meals: {}", e)))?;
        let stored = storage
            .create_meal_plan(NewMealPlan {
                user_id,
                name: custom_name(&req).unwrap_or(plan.name),
                description: Some(plan.description).filter(|d| !d.is_empty()),
                calories: plan.calories,
                meals,
            })
            .await?;

        info!(user_id, plan_id = stored.id, ?source, "Meal plan created");
        Ok(MealPlanResponse {
            plan: stored,
            source,
        })
    }

    pub async fn list(storage: &dyn Storage, user_id: Id) -> Result<Vec<MealPlan>, ApiError> {
        Ok(storage.meal_plans(user_id).await?)
    }

    pub async fn get(storage: &dyn Storage, user_id: Id, id: Id) -> Result<MealPlan, ApiError> {
        owned_by(storage.meal_plan(id).await?, user_id, |p| p.user_id, "Meal plan")
    }

    pub async fn delete(storage: &dyn Storage, user_id: Id, id: Id) -> Result<(), ApiError> {
        Self::get(storage, user_id, id).await?;
        storage.delete_meal_plan(id).await?;
        info!(user_id, plan_id = id, "Meal plan deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use axum::http::StatusCode;

    fn request(diet: &str, meals_per_day: u8) -> MealPlanRequest {
        MealPlanRequest {
            name: None,
            diet_type: diet.to_string(),
            meals_per_day,
            calorie_target: None,
            allergies: vec![],
            health_conditions: vec![],
        }
    }

    #[test]
    fn test_unknown_selectors_unprocessable() {
        let err = MealPlanService::default_plan(&request("carnivore", 3)).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let err = MealPlanService::default_plan(&request("keto", 6)).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_calorie_target_validated() {
        let mut req = request("keto", 3);
        req.calorie_target = Some(100);
        let err = MealPlanService::default_plan(&req).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_falls_back_to_default() {
        let storage = MemStorage::new();
        let mut req = request("high-protein", 4);
        req.name = Some("  My week  ".to_string());

        let response = MealPlanService::create(&storage, &AiAssistant::disabled(), 1, req)
            .await
            .unwrap();

        assert_eq!(response.source, ContentSource::Default);
        assert_eq!(response.plan.name, "My week");
        assert_eq!(response.plan.meals["snacks"].as_array().unwrap().len(), 1);
        assert!(response.plan.calories > 0);
        assert_eq!(MealPlanService::list(&storage, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plans_are_private() {
        let storage = MemStorage::new();
        let plan = MealPlanService::create(&storage, &AiAssistant::disabled(), 1, request("vegan", 3))
            .await
            .unwrap()
            .plan;

        let err = MealPlanService::get(&storage, 2, plan.id).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert!(MealPlanService::list(&storage, 2).await.unwrap().is_empty());

        MealPlanService::delete(&storage, 1, plan.id).await.unwrap();
        let err = MealPlanService::get(&storage, 1, plan.id).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
