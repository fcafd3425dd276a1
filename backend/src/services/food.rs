//! Food photo analysis and food history

use super::owned_by;
use crate::ai::AiAssistant;
use crate::error::ApiError;
use crate::storage::Storage;
use base64::{engine::general_purpose::STANDARD, Engine};
use nutrifit_shared::alternatives::default_alternatives;
use nutrifit_shared::validation::{self, field};
use nutrifit_shared::{
    AlternativesRequest, AlternativesResponse, AnalyzeFoodResponse, ContentSource, FoodEntry, Id,
    NewFoodEntry,
};
use tracing::{info, warn};

/// An uploaded image as received from the multipart form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check type and size; `max_bytes` is the upload limit
    pub fn validate(&self, max_bytes: usize) -> Result<(), ApiError> {
        field("image", || {
            validation::validate_image_content_type(self.content_type.as_deref())
        })?;
        if self.bytes.is_empty() {
            return Err(ApiError::BadRequest("Image file is empty".to_string()));
        }
        if self.bytes.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge(format!(
                "Image must be at most {} MB",
                max_bytes / (1024 * 1024)
            )));
        }
        Ok(())
    }

    /// Inline `data:` URL for the image
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type.as_deref().unwrap_or("image/jpeg"),
            STANDARD.encode(&self.bytes)
        )
    }
}

pub struct FoodService;

impl FoodService {
    /// Analyze a food photo and log the result
    pub async fn analyze(
        storage: &dyn Storage,
        ai: &AiAssistant,
        user_id: Id,
        image: ImageUpload,
        max_bytes: usize,
    ) -> Result<AnalyzeFoodResponse, ApiError> {
        image.validate(max_bytes)?;
        let data_url = image.data_url();

        let analysis = ai.analyze_food(&data_url).await?;
        let alternatives = if analysis.alternatives.is_empty() {
            default_alternatives(&analysis.food_name)
        } else {
            analysis.alternatives
        };

        let entry = storage
            .create_food_entry(NewFoodEntry {
                user_id,
                food_name: analysis.food_name,
                calories: analysis.calories,
                protein: analysis.protein,
                carbs: analysis.carbs,
                fats: analysis.fats,
                nutrients: analysis.nutrients,
                image_url: Some(data_url),
            })
            .await?;

        metrics::counter!("nutrifit_food_entries_created_total").increment(1);
        info!(
            user_id,
            entry_id = entry.id,
            food = %entry.food_name,
            calories = entry.calories,
            "Food entry logged"
        );

        Ok(AnalyzeFoodResponse {
            entry,
            alternatives,
        })
    }

    /// A user's food entries, newest first
    pub async fn history(storage: &dyn Storage, user_id: Id) -> Result<Vec<FoodEntry>, ApiError> {
        let mut entries = storage.food_entries(user_id).await?;
        entries.reverse();
        Ok(entries)
    }

    pub async fn get(storage: &dyn Storage, user_id: Id, id: Id) -> Result<FoodEntry, ApiError> {
        owned_by(storage.food_entry(id).await?, user_id, |e| e.user_id, "Food entry")
    }

    pub async fn delete(storage: &dyn Storage, user_id: Id, id: Id) -> Result<(), ApiError> {
        Self::get(storage, user_id, id).await?;
        storage.delete_food_entry(id).await?;
        info!(user_id, entry_id = id, "Food entry deleted");
        Ok(())
    }

    /// Healthier alternatives from the AI, or the static table when the AI
    /// cannot answer
    pub async fn alternatives(
        ai: &AiAssistant,
        req: AlternativesRequest,
    ) -> Result<AlternativesResponse, ApiError> {
        let food_name = req.food_name.trim();
        if food_name.is_empty() {
            return Err(ApiError::Validation("Food name is required".to_string()));
        }

        if ai.is_enabled() {
            match ai.suggest_alternatives(food_name, req.goal.as_deref()).await {
                Ok(alternatives) => {
                    return Ok(AlternativesResponse {
                        alternatives,
                        source: ContentSource::Ai,
                    })
                }
                Err(e) => warn!(error = %e, food = food_name, "AI alternatives failed, using defaults"),
            }
        }

        Ok(AlternativesResponse {
            alternatives: default_alternatives(food_name),
            source: ContentSource::Default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use axum::http::StatusCode;
    use nutrifit_shared::Nutrients;
    use rstest::rstest;

    fn png(len: usize) -> ImageUpload {
        ImageUpload {
            content_type: Some("image/png".to_string()),
            bytes: vec![7; len],
        }
    }

    #[rstest]
    #[case(Some("text/plain"), 10, StatusCode::BAD_REQUEST)]
    #[case(None, 10, StatusCode::BAD_REQUEST)]
    #[case(Some("image/png"), 0, StatusCode::BAD_REQUEST)]
    #[case(Some("image/png"), 101, StatusCode::PAYLOAD_TOO_LARGE)]
    fn test_upload_validation(
        #[case] content_type: Option<&str>,
        #[case] len: usize,
        #[case] expected: StatusCode,
    ) {
        let upload = ImageUpload {
            content_type: content_type.map(str::to_string),
            bytes: vec![1; len],
        };
        assert_eq!(upload.validate(100).unwrap_err().status(), expected);
    }

    #[test]
    fn test_data_url() {
        assert_eq!(png(3).data_url(), "data:image/png;base64,BwcH");
        assert!(png(100).validate(100).is_ok());
    }

    #[tokio::test]
    async fn test_analyze_with_ai_disabled_is_bad_gateway() {
        let storage = MemStorage::new();
        let err = FoodService::analyze(&storage, &AiAssistant::disabled(), 1, png(10), 100)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(storage.food_entries(1).await.unwrap().is_empty());
    }

    async fn log(storage: &MemStorage, user_id: Id, name: &str) -> FoodEntry {
        storage
            .create_food_entry(NewFoodEntry {
                user_id,
                food_name: name.to_string(),
                calories: 100.0,
                protein: 1.0,
                carbs: 1.0,
                fats: 1.0,
                nutrients: Nutrients::default(),
                image_url: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let storage = MemStorage::new();
        log(&storage, 1, "Oats").await;
        log(&storage, 2, "Other user's toast").await;
        log(&storage, 1, "Salad").await;

        let names: Vec<String> = FoodService::history(&storage, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.food_name)
            .collect();
        assert_eq!(names, vec!["Salad", "Oats"]);
    }

    #[tokio::test]
    async fn test_ownership_checks() {
        let storage = MemStorage::new();
        let entry = log(&storage, 1, "Oats").await;

        let err = FoodService::delete(&storage, 2, entry.id).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        let err = FoodService::get(&storage, 1, 999).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        FoodService::delete(&storage, 1, entry.id).await.unwrap();
        assert!(storage.food_entry(entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_alternatives_fall_back_to_table() {
        let response = FoodService::alternatives(
            &AiAssistant::disabled(),
            AlternativesRequest {
                food_name: "Pepperoni Pizza".to_string(),
                goal: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(response.source, ContentSource::Default);
        assert!(!response.alternatives.is_empty());
    }
}
