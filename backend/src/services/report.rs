//! PDF and CSV exports of a user's data

use super::UserService;
use crate::config::ReportConfig;
use crate::error::ApiError;
use crate::report::{build_pages, render_pdf, ReportData};
use crate::storage::Storage;
use chrono::Utc;
use nutrifit_shared::{compute_trends, FoodEntry, Id};
use serde::Serialize;
use tracing::info;

/// One row of the food history CSV
#[derive(Debug, Serialize)]
struct FoodCsvRow {
    date: String,
    food: String,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fats_g: f64,
    fiber_g: f64,
    sugar_g: f64,
}

impl From<&FoodEntry> for FoodCsvRow {
    fn from(e: &FoodEntry) -> Self {
        Self {
            date: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            food: e.food_name.clone(),
            calories: e.calories,
            protein_g: e.protein,
            carbs_g: e.carbs,
            fats_g: e.fats,
            fiber_g: e.nutrients.fiber,
            sugar_g: e.nutrients.sugar,
        }
    }
}

pub struct ReportService;

impl ReportService {
    async fn gather(storage: &dyn Storage, user_id: Id) -> Result<ReportData, ApiError> {
        let user = UserService::current_user(storage, user_id).await?;
        let mut entries = storage.food_entries(user_id).await?;
        let trends = compute_trends(&entries);
        entries.reverse();

        Ok(ReportData {
            user,
            generated_at: Utc::now(),
            trends,
            entries,
            meal_plans: storage.meal_plans(user_id).await?,
            workout_plans: storage.workout_plans(user_id).await?,
        })
    }

    /// Render the full health report as PDF bytes
    pub async fn pdf(
        storage: &dyn Storage,
        config: &ReportConfig,
        user_id: Id,
    ) -> Result<Vec<u8>, ApiError> {
        let data = Self::gather(storage, user_id).await?;
        let threshold = config.page_threshold_mm;

        // Layout and encoding are CPU-bound
        let bytes = tokio::task::spawn_blocking(move || {
            let pages = build_pages(&data, threshold);
            render_pdf("NutriFit Health Report", &pages)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))??;

        info!(user_id, bytes = bytes.len(), "PDF report generated");
        Ok(bytes)
    }

    /// Food history as CSV, oldest first
    pub async fn food_history_csv(storage: &dyn Storage, user_id: Id) -> Result<String, ApiError> {
        let entries = storage.food_entries(user_id).await?;
        let rows: Vec<FoodCsvRow> = entries.iter().map(FoodCsvRow::from).collect();
        Self::to_csv(&rows)
    }

    fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use nutrifit_shared::{NewFoodEntry, NewUser, Nutrients};

    async fn seeded() -> (MemStorage, Id) {
        let storage = MemStorage::new();
        let user = storage
            .create_user(NewUser {
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                full_name: None,
                password: "hash".to_string(),
                profile_pic: None,
            })
            .await
            .unwrap();
        for name in ["Oats, with honey", "Salad"] {
            storage
                .create_food_entry(NewFoodEntry {
                    user_id: user.id,
                    food_name: name.to_string(),
                    calories: 300.0,
                    protein: 10.0,
                    carbs: 40.0,
                    fats: 8.0,
                    nutrients: Nutrients::default(),
                    image_url: None,
                })
                .await
                .unwrap();
        }
        (storage, user.id)
    }

    #[tokio::test]
    async fn test_csv_export() {
        let (storage, user_id) = seeded().await;
        let csv = ReportService::food_history_csv(&storage, user_id).await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,food,calories,protein_g,carbs_g,fats_g,fiber_g,sugar_g"
        );
        assert_eq!(lines.len(), 3);
        // Commas inside a field are quoted
        assert!(lines[1].contains("\"Oats, with honey\""));
    }

    #[tokio::test]
    async fn test_pdf_export() {
        let (storage, user_id) = seeded().await;
        let bytes = ReportService::pdf(&storage, &ReportConfig::default(), user_id)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_pdf_for_missing_user_unauthorized() {
        let storage = MemStorage::new();
        let err = ReportService::pdf(&storage, &ReportConfig::default(), 42)
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
