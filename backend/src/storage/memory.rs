//! In-memory storage backend
//!
//! Plain maps behind a single `RwLock`. Each entity kind has its own id
//! counter starting at 1; ids are never reused, so iterating a `BTreeMap`
//! yields records in insertion order.

use super::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::Utc;
use nutrifit_shared::{
    FoodEntry, Id, MealPlan, NewFoodEntry, NewMealPlan, NewUser, NewWorkoutPlan, User,
    WaitlistUser, WorkoutPlan,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Counters {
    user: Id,
    food_entry: Id,
    meal_plan: Id,
    workout_plan: Id,
    waitlist: Id,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            user: 1,
            food_entry: 1,
            meal_plan: 1,
            workout_plan: 1,
            waitlist: 1,
        }
    }
}

fn next_id(counter: &mut Id) -> Id {
    let id = *counter;
    *counter += 1;
    id
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<Id, User>,
    food_entries: BTreeMap<Id, FoodEntry>,
    meal_plans: BTreeMap<Id, MealPlan>,
    workout_plans: BTreeMap<Id, WorkoutPlan>,
    waitlist: BTreeMap<Id, WaitlistUser>,
    counters: Counters,
}

/// Process-local storage; contents are lost on restart
#[derive(Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == user.username) {
            return Err(StorageError::Conflict("Username already exists".to_string()));
        }
        if t.users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StorageError::Conflict("Email already registered".to_string()));
        }

        let id = next_id(&mut t.counters.user);
        let user = User {
            id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            password: user.password,
            profile_pic: user.profile_pic,
            created_at: Utc::now(),
        };
        t.users.insert(id, user.clone());
        Ok(user)
    }

    async fn user(&self, id: Id) -> StorageResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_food_entry(&self, entry: NewFoodEntry) -> StorageResult<FoodEntry> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.counters.food_entry);
        let entry = FoodEntry {
            id,
            user_id: entry.user_id,
            food_name: entry.food_name,
            calories: entry.calories,
            protein: entry.protein,
            carbs: entry.carbs,
            fats: entry.fats,
            nutrients: entry.nutrients,
            image_url: entry.image_url,
            created_at: Utc::now(),
        };
        t.food_entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn food_entry(&self, id: Id) -> StorageResult<Option<FoodEntry>> {
        Ok(self.tables.read().await.food_entries.get(&id).cloned())
    }

    async fn food_entries(&self, user_id: Id) -> StorageResult<Vec<FoodEntry>> {
        let t = self.tables.read().await;
        Ok(t.food_entries
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_food_entry(&self, id: Id) -> StorageResult<bool> {
        Ok(self.tables.write().await.food_entries.remove(&id).is_some())
    }

    async fn create_meal_plan(&self, plan: NewMealPlan) -> StorageResult<MealPlan> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.counters.meal_plan);
        let plan = MealPlan {
            id,
            user_id: plan.user_id,
            name: plan.name,
            description: plan.description,
            calories: plan.calories,
            meals: plan.meals,
            created_at: Utc::now(),
        };
        t.meal_plans.insert(id, plan.clone());
        Ok(plan)
    }

    async fn meal_plan(&self, id: Id) -> StorageResult<Option<MealPlan>> {
        Ok(self.tables.read().await.meal_plans.get(&id).cloned())
    }

    async fn meal_plans(&self, user_id: Id) -> StorageResult<Vec<MealPlan>> {
        let t = self.tables.read().await;
        Ok(t.meal_plans
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_meal_plan(&self, id: Id) -> StorageResult<bool> {
        Ok(self.tables.write().await.meal_plans.remove(&id).is_some())
    }

    async fn create_workout_plan(&self, plan: NewWorkoutPlan) -> StorageResult<WorkoutPlan> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.counters.workout_plan);
        let plan = WorkoutPlan {
            id,
            user_id: plan.user_id,
            name: plan.name,
            description: plan.description,
            exercises: plan.exercises,
            calories_burned: plan.calories_burned,
            created_at: Utc::now(),
        };
        t.workout_plans.insert(id, plan.clone());
        Ok(plan)
    }

    async fn workout_plan(&self, id: Id) -> StorageResult<Option<WorkoutPlan>> {
        Ok(self.tables.read().await.workout_plans.get(&id).cloned())
    }

    async fn workout_plans(&self, user_id: Id) -> StorageResult<Vec<WorkoutPlan>> {
        let t = self.tables.read().await;
        Ok(t.workout_plans
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_workout_plan(&self, id: Id) -> StorageResult<bool> {
        Ok(self.tables.write().await.workout_plans.remove(&id).is_some())
    }

    async fn add_waitlist_user(&self, email: &str) -> StorageResult<WaitlistUser> {
        let mut t = self.tables.write().await;
        if t.waitlist.values().any(|w| w.email.eq_ignore_ascii_case(email)) {
            return Err(StorageError::Conflict("Email is already on the waitlist".to_string()));
        }
        let id = next_id(&mut t.counters.waitlist);
        let entry = WaitlistUser {
            id,
            email: email.to_string(),
            created_at: Utc::now(),
        };
        t.waitlist.insert(id, entry.clone());
        Ok(entry)
    }

    async fn waitlist_user_by_email(&self, email: &str) -> StorageResult<Option<WaitlistUser>> {
        let t = self.tables.read().await;
        Ok(t.waitlist
            .values()
            .find(|w| w.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrifit_shared::Nutrients;
    use proptest::prelude::*;
    use serde_json::json;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            full_name: None,
            password: "hash".to_string(),
            profile_pic: None,
        }
    }

    fn new_entry(user_id: Id, name: &str, calories: f64) -> NewFoodEntry {
        NewFoodEntry {
            user_id,
            food_name: name.to_string(),
            calories,
            protein: 10.0,
            carbs: 20.0,
            fats: 5.0,
            nutrients: Nutrients::default(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_per_kind() {
        let store = MemStorage::new();
        let user = store.create_user(new_user("alice", "a@example.com")).await.unwrap();
        let entry = store.create_food_entry(new_entry(user.id, "Apple", 95.0)).await.unwrap();
        let plan = store
            .create_meal_plan(NewMealPlan {
                user_id: user.id,
                name: "Plan".to_string(),
                description: None,
                calories: 1800,
                meals: json!({}),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(entry.id, 1);
        assert_eq!(plan.id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemStorage::new();
        store.create_user(new_user("alice", "a@example.com")).await.unwrap();

        let err = store
            .create_user(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let err = store
            .create_user(new_user("alice2", "A@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_email_lookup_case_insensitive() {
        let store = MemStorage::new();
        store.create_user(new_user("alice", "Alice@Example.com")).await.unwrap();
        assert!(store.user_by_email("alice@example.com").await.unwrap().is_some());
        assert!(store.user_by_username("ALICE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_ids_not_reused() {
        let store = MemStorage::new();
        let first = store.create_food_entry(new_entry(1, "A", 1.0)).await.unwrap();
        assert!(store.delete_food_entry(first.id).await.unwrap());
        assert!(!store.delete_food_entry(first.id).await.unwrap());

        let second = store.create_food_entry(new_entry(1, "B", 1.0)).await.unwrap();
        assert_eq!(second.id, first.id + 1);
        assert!(store.food_entry(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_waitlist_duplicates_conflict() {
        let store = MemStorage::new();
        store.add_waitlist_user("x@example.com").await.unwrap();
        let err = store.add_waitlist_user("X@EXAMPLE.COM").await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        assert!(store.waitlist_user_by_email("x@Example.com").await.unwrap().is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Ids strictly increase and the stored entry echoes its input
        #[test]
        fn prop_food_entry_ids_strictly_increase(
            calories in prop::collection::vec(0.0f64..5000.0, 1..30),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let store = MemStorage::new();
                let mut last = 0;
                for (i, kcal) in calories.iter().enumerate() {
                    let input = new_entry(1, &format!("food {}", i), *kcal);
                    let entry = store.create_food_entry(input.clone()).await.unwrap();

                    prop_assert!(entry.id > last);
                    last = entry.id;
                    prop_assert_eq!(&entry.food_name, &input.food_name);
                    prop_assert_eq!(entry.calories, input.calories);
                    prop_assert_eq!(entry.user_id, input.user_id);
                    prop_assert_eq!(&entry.nutrients, &input.nutrients);
                }
                Ok(())
            })?;
        }

        /// Listing returns only the owner's entries, in insertion order
        #[test]
        fn prop_food_entries_filtered_in_insertion_order(
            owners in prop::collection::vec(1i64..4, 0..40),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let store = MemStorage::new();
                let mut expected: Vec<Id> = Vec::new();
                for (i, owner) in owners.iter().enumerate() {
                    let entry = store
                        .create_food_entry(new_entry(*owner, &format!("food {}", i), 100.0))
                        .await
                        .unwrap();
                    if *owner == 2 {
                        expected.push(entry.id);
                    }
                }

                let listed = store.food_entries(2).await.unwrap();
                prop_assert!(listed.iter().all(|e| e.user_id == 2));
                let ids: Vec<Id> = listed.iter().map(|e| e.id).collect();
                prop_assert_eq!(ids, expected);
                Ok(())
            })?;
        }
    }
}
