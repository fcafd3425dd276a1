//! PostgreSQL storage backend

use super::{Storage, StorageError, StorageResult};
use crate::db;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nutrifit_shared::{
    FoodEntry, Id, MealPlan, NewFoodEntry, NewMealPlan, NewUser, NewWorkoutPlan, Nutrients, User,
    WaitlistUser, WorkoutPlan,
};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    email: String,
    full_name: Option<String>,
    password: String,
    profile_pic: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: r.id,
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            password: r.password,
            profile_pic: r.profile_pic,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FoodEntryRecord {
    id: i64,
    user_id: i64,
    food_name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    nutrients: Json<Nutrients>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<FoodEntryRecord> for FoodEntry {
    fn from(r: FoodEntryRecord) -> Self {
        FoodEntry {
            id: r.id,
            user_id: r.user_id,
            food_name: r.food_name,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fats: r.fats,
            nutrients: r.nutrients.0,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MealPlanRecord {
    id: i64,
    user_id: i64,
    name: String,
    description: Option<String>,
    calories: i32,
    meals: Value,
    created_at: DateTime<Utc>,
}

impl From<MealPlanRecord> for MealPlan {
    fn from(r: MealPlanRecord) -> Self {
        MealPlan {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            description: r.description,
            calories: r.calories,
            meals: r.meals,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkoutPlanRecord {
    id: i64,
    user_id: i64,
    name: String,
    description: Option<String>,
    exercises: Value,
    calories_burned: i32,
    created_at: DateTime<Utc>,
}

impl From<WorkoutPlanRecord> for WorkoutPlan {
    fn from(r: WorkoutPlanRecord) -> Self {
        WorkoutPlan {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            description: r.description,
            exercises: r.exercises,
            calories_burned: r.calories_burned,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WaitlistRecord {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<WaitlistRecord> for WaitlistUser {
    fn from(r: WaitlistRecord) -> Self {
        WaitlistUser {
            id: r.id,
            email: r.email,
            created_at: r.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, username, email, full_name, password, profile_pic, created_at";
const FOOD_COLUMNS: &str =
    "id, user_id, food_name, calories, protein, carbs, fats, nutrients, image_url, created_at";
const MEAL_PLAN_COLUMNS: &str = "id, user_id, name, description, calories, meals, created_at";
const WORKOUT_PLAN_COLUMNS: &str =
    "id, user_id, name, description, exercises, calories_burned, created_at";

/// Map a unique-constraint violation to a conflict with `message`
fn conflict_on_unique(err: sqlx::Error, message: &str) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Conflict(message.to_string())
        }
        _ => StorageError::Database(err),
    }
}

/// PostgreSQL-backed storage
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (username, email, full_name, password, profile_pic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.password)
        .bind(&user.profile_pic)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already registered"))?;

        Ok(record.into())
    }

    async fn user(&self, id: Id) -> StorageResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(User::from))
    }

    async fn user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(User::from))
    }

    async fn user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(User::from))
    }

    async fn create_food_entry(&self, entry: NewFoodEntry) -> StorageResult<FoodEntry> {
        let record = sqlx::query_as::<_, FoodEntryRecord>(&format!(
            r#"
            INSERT INTO food_entries
                (user_id, food_name, calories, protein, carbs, fats, nutrients, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {FOOD_COLUMNS}
            "#
        ))
        .bind(entry.user_id)
        .bind(&entry.food_name)
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fats)
        .bind(Json(&entry.nutrients))
        .bind(&entry.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn food_entry(&self, id: Id) -> StorageResult<Option<FoodEntry>> {
        let record = sqlx::query_as::<_, FoodEntryRecord>(&format!(
            "SELECT {FOOD_COLUMNS} FROM food_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(FoodEntry::from))
    }

    async fn food_entries(&self, user_id: Id) -> StorageResult<Vec<FoodEntry>> {
        let records = sqlx::query_as::<_, FoodEntryRecord>(&format!(
            "SELECT {FOOD_COLUMNS} FROM food_entries WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(FoodEntry::from).collect())
    }

    async fn delete_food_entry(&self, id: Id) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_meal_plan(&self, plan: NewMealPlan) -> StorageResult<MealPlan> {
        let record = sqlx::query_as::<_, MealPlanRecord>(&format!(
            r#"
            INSERT INTO meal_plans (user_id, name, description, calories, meals)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MEAL_PLAN_COLUMNS}
            "#
        ))
        .bind(plan.user_id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.calories)
        .bind(&plan.meals)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn meal_plan(&self, id: Id) -> StorageResult<Option<MealPlan>> {
        let record = sqlx::query_as::<_, MealPlanRecord>(&format!(
            "SELECT {MEAL_PLAN_COLUMNS} FROM meal_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(MealPlan::from))
    }

    async fn meal_plans(&self, user_id: Id) -> StorageResult<Vec<MealPlan>> {
        let records = sqlx::query_as::<_, MealPlanRecord>(&format!(
            "SELECT {MEAL_PLAN_COLUMNS} FROM meal_plans WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(MealPlan::from).collect())
    }

    async fn delete_meal_plan(&self, id: Id) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_workout_plan(&self, plan: NewWorkoutPlan) -> StorageResult<WorkoutPlan> {
        let record = sqlx::query_as::<_, WorkoutPlanRecord>(&format!(
            r#"
            INSERT INTO workout_plans (user_id, name, description, exercises, calories_burned)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WORKOUT_PLAN_COLUMNS}
            "#
        ))
        .bind(plan.user_id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(&plan.exercises)
        .bind(plan.calories_burned)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn workout_plan(&self, id: Id) -> StorageResult<Option<WorkoutPlan>> {
        let record = sqlx::query_as::<_, WorkoutPlanRecord>(&format!(
            "SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(WorkoutPlan::from))
    }

    async fn workout_plans(&self, user_id: Id) -> StorageResult<Vec<WorkoutPlan>> {
        let records = sqlx::query_as::<_, WorkoutPlanRecord>(&format!(
            "SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(WorkoutPlan::from).collect())
    }

    async fn delete_workout_plan(&self, id: Id) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM workout_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_waitlist_user(&self, email: &str) -> StorageResult<WaitlistUser> {
        let record = sqlx::query_as::<_, WaitlistRecord>(
            r#"
            INSERT INTO waitlist_users (email)
            VALUES ($1)
            RETURNING id, email, created_at
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email is already on the waitlist"))?;
        Ok(record.into())
    }

    async fn waitlist_user_by_email(&self, email: &str) -> StorageResult<Option<WaitlistUser>> {
        let record = sqlx::query_as::<_, WaitlistRecord>(
            "SELECT id, email, created_at FROM waitlist_users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(WaitlistUser::from))
    }

    async fn health_check(&self) -> StorageResult<()> {
        db::health_check(&self.pool).await.map_err(StorageError::Other)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
