//! Workout plan generation and storage
//!
//! Same flow as meal plans: AI first, the default catalogue as fallback,
//! health-condition substitution on exercise names either way.

use super::owned_by;
use crate::ai::AiAssistant;
use crate::error::ApiError;
use crate::storage::Storage;
use nutrifit_shared::plans::{
    default_workout_plan, substitution, DefaultWorkoutPlan, FitnessGoal, FitnessLevel,
};
use nutrifit_shared::{
    ContentSource, Id, NewWorkoutPlan, WorkoutPlan, WorkoutPlanRequest, WorkoutPlanResponse,
};
use tracing::{info, warn};

fn custom_name(req: &WorkoutPlanRequest) -> Option<String> {
    req.name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn selectors(req: &WorkoutPlanRequest) -> Result<(FitnessGoal, FitnessLevel), ApiError> {
    Ok((req.goal.parse()?, req.fitness_level.parse()?))
}

pub struct WorkoutPlanService;

impl WorkoutPlanService {
    /// Default catalogue session for `req`, not stored
    pub fn default_plan(req: &WorkoutPlanRequest) -> Result<DefaultWorkoutPlan, ApiError> {
        let (goal, level) = selectors(req)?;
        let mut plan = default_workout_plan(goal, level, &req.health_conditions)?;
        if let Some(name) = custom_name(req) {
            plan.name = name;
        }
        Ok(plan)
    }

    /// Generate a session (AI first, catalogue as fallback) and store it
    pub async fn create(
        storage: &dyn Storage,
        ai: &AiAssistant,
        user_id: Id,
        req: WorkoutPlanRequest,
    ) -> Result<WorkoutPlanResponse, ApiError> {
        let (goal, level) = selectors(&req)?;

        let mut generated = None;
        if ai.is_enabled() {
            match ai
                .generate_workout_plan(goal, level, req.duration_minutes, &req.health_conditions)
                .await
            {
                Ok(mut plan) => {
                    let substitutions =
                        substitution::for_exercise_conditions(&req.health_conditions);
                    substitution::apply_to_workout(&mut plan.content, &substitutions);
                    generated = Some(DefaultWorkoutPlan {
                        name: plan.name.unwrap_or_else(|| {
                            format!("{} {} Workout", level.label(), goal.label())
                        }),
                        description: plan.description.unwrap_or_default(),
                        calories_burned: plan.calories_burned,
                        content: plan.content,
                    });
                }
                Err(e) => warn!(error = %e, user_id, "AI workout plan failed, using default plan"),
            }
        }

        let (plan, source) = match generated {
            Some(plan) => (plan, ContentSource::Ai),
            None => (Self::default_plan(&req)?, ContentSource::Default),
        };

        let exercises = serde_json::to_value(&plan.content).map_err(|e| {
            ApiError::Internal(anyhow::anyhow!("Failed to encode exercises: {}", e))
        })?;
        let stored = storage
            .create_workout_plan(NewWorkoutPlan {
                user_id,
                name: custom_name(&req).unwrap_or(plan.name),
                description: Some(plan.description).filter(|d| !d.is_empty()),
                exercises,
                calories_burned: plan.calories_burned,
            })
            .await?;

        info!(user_id, plan_id = stored.id, ?source, "Workout plan created");
        Ok(WorkoutPlanResponse {
            plan: stored,
            source,
        })
    }

    pub async fn list(storage: &dyn Storage, user_id: Id) -> Result<Vec<WorkoutPlan>, ApiError> {
        Ok(storage.workout_plans(user_id).await?)
    }

    pub async fn get(storage: &dyn Storage, user_id: Id, id: Id) -> Result<WorkoutPlan, ApiError> {
        owned_by(storage.workout_plan(id).await?, user_id, |p| p.user_id, "Workout plan")
    }

    pub async fn delete(storage: &dyn Storage, user_id: Id, id: Id) -> Result<(), ApiError> {
        Self::get(storage, user_id, id).await?;
        storage.delete_workout_plan(id).await?;
        info!(user_id, plan_id = id, "Workout plan deleted");
        Ok(())
    }
}
