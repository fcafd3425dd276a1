//! Storage layer
//!
//! [`Storage`] is the data access seam for every service. Two backends
//! implement it: [`MemStorage`] (process-local maps, the default) and
//! [`PgStorage`] (PostgreSQL through sqlx).
//!
//! Storage does no authorization; ownership checks live in the services.

mod memory;
mod postgres;

pub use memory::MemStorage;
pub use postgres::PgStorage;

use crate::config::{StorageBackend, StorageConfig};
use crate::db;
use async_trait::async_trait;
use nutrifit_shared::{
    FoodEntry, Id, MealPlan, NewFoodEntry, NewMealPlan, NewUser, NewWorkoutPlan, User,
    WaitlistUser, WorkoutPlan,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    /// A uniqueness constraint was violated
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence operations for all NutriFit records
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a user; username and email (case-insensitive) must be unique
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;
    async fn user(&self, id: Id) -> StorageResult<Option<User>>;
    async fn user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    /// Case-insensitive lookup
    async fn user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Store a food entry under the next id, stamped with the current time
    async fn create_food_entry(&self, entry: NewFoodEntry) -> StorageResult<FoodEntry>;
    async fn food_entry(&self, id: Id) -> StorageResult<Option<FoodEntry>>;
    /// A user's entries in insertion order
    async fn food_entries(&self, user_id: Id) -> StorageResult<Vec<FoodEntry>>;
    async fn delete_food_entry(&self, id: Id) -> StorageResult<bool>;

    async fn create_meal_plan(&self, plan: NewMealPlan) -> StorageResult<MealPlan>;
    async fn meal_plan(&self, id: Id) -> StorageResult<Option<MealPlan>>;
    async fn meal_plans(&self, user_id: Id) -> StorageResult<Vec<MealPlan>>;
    async fn delete_meal_plan(&self, id: Id) -> StorageResult<bool>;

    async fn create_workout_plan(&self, plan: NewWorkoutPlan) -> StorageResult<WorkoutPlan>;
    async fn workout_plan(&self, id: Id) -> StorageResult<Option<WorkoutPlan>>;
    async fn workout_plans(&self, user_id: Id) -> StorageResult<Vec<WorkoutPlan>>;
    async fn delete_workout_plan(&self, id: Id) -> StorageResult<bool>;

    /// Add an email to the waitlist; duplicates (case-insensitive) conflict
    async fn add_waitlist_user(&self, email: &str) -> StorageResult<WaitlistUser>;
    async fn waitlist_user_by_email(&self, email: &str) -> StorageResult<Option<WaitlistUser>>;

    /// Readiness of the backing store
    async fn health_check(&self) -> StorageResult<()>;

    /// Short backend name for health reporting
    fn backend_name(&self) -> &'static str;
}

/// Build the configured storage backend
///
/// The Postgres backend runs pending migrations outside production.
pub async fn connect(config: &StorageConfig, run_migrations: bool) -> anyhow::Result<Arc<dyn Storage>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemStorage::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::create_pool(&config.database_url, config.max_connections).await?;
            if run_migrations {
                db::run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgStorage::new(pool)))
        }
    }
}
