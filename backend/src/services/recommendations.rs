//! Nutrient trends and dietary recommendations
//!
//! Rule-based recommendations flag nutrients averaging under 70% of their
//! RDA, and calories, sugar or sodium averaging over 130%.

use crate::ai::AiAssistant;
use crate::error::ApiError;
use crate::storage::Storage;
use nutrifit_shared::nutrients::NutrientAverage;
use nutrifit_shared::{
    compute_trends, ContentSource, Id, NutrientTrends, Priority, Recommendation,
    RecommendationsResponse,
};
use tracing::{debug, warn};

const DEFICIENT_BELOW_PERCENT: f64 = 70.0;
const EXCESS_ABOVE_PERCENT: f64 = 130.0;
const SEVERE_BELOW_PERCENT: f64 = 40.0;

/// Nutrients where too much is the concern
const LIMITED: &[&str] = &["calories", "sugar", "sodium"];

const FOOD_SOURCES: &[(&str, &str)] = &[
    ("protein", "eggs, Greek yogurt, legumes, fish or lean poultry"),
    ("carbs", "oats, brown rice, potatoes or fruit"),
    ("fats", "avocado, olive oil, nuts or oily fish"),
    ("fiber", "beans, lentils, whole grains and vegetables"),
    ("a", "carrots, sweet potatoes and leafy greens"),
    ("c", "citrus fruit, bell peppers, strawberries or broccoli"),
    ("d", "oily fish, fortified milk or eggs"),
    ("e", "sunflower seeds, almonds or spinach"),
    ("k", "kale, spinach or broccoli"),
    ("b12", "fish, eggs, dairy or fortified cereals"),
    ("b9", "leafy greens, lentils or chickpeas"),
    ("calcium", "dairy, fortified plant milk, tofu or sardines"),
    ("iron", "red meat, lentils, spinach or fortified cereals"),
    ("magnesium", "pumpkin seeds, almonds, spinach or black beans"),
    ("potassium", "bananas, potatoes, beans or yogurt"),
    ("zinc", "shellfish, meat, pumpkin seeds or chickpeas"),
];

fn food_sources(key: &str) -> Option<&'static str> {
    FOOD_SOURCES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, sources)| *sources)
}

fn category(trends: &NutrientTrends, nutrient: &NutrientAverage) -> &'static str {
    if trends.vitamins.iter().any(|v| v.key == nutrient.key) {
        "vitamins"
    } else if trends.minerals.iter().any(|m| m.key == nutrient.key) {
        "minerals"
    } else {
        "macronutrients"
    }
}

fn deficiency(trends: &NutrientTrends, n: &NutrientAverage, percent: f64) -> Recommendation {
    let mut message = format!(
        "Your meals average {:.1} {} of {}, {:.0}% of the recommended {} {}.",
        n.average,
        n.unit,
        n.name,
        percent,
        n.recommended.unwrap_or_default(),
        n.unit
    );
    if let Some(sources) = food_sources(&n.key) {
        message.push_str(&format!(" Good sources include {}.", sources));
    }
    Recommendation {
        category: category(trends, n).to_string(),
        title: format!("Increase {}", n.name),
        message,
        priority: if percent < SEVERE_BELOW_PERCENT {
            Priority::High
        } else {
            Priority::Medium
        },
    }
}

fn excess(trends: &NutrientTrends, n: &NutrientAverage, percent: f64) -> Recommendation {
    Recommendation {
        category: category(trends, n).to_string(),
        title: format!("Reduce {}", n.name),
        message: format!(
            "Your meals average {:.1} {} of {}, {:.0}% of the recommended {} {}. \
             Favour whole foods over processed and sweetened ones.",
            n.average,
            n.unit,
            n.name,
            percent,
            n.recommended.unwrap_or_default(),
            n.unit
        ),
        priority: if n.key == "calories" {
            Priority::Medium
        } else {
            Priority::High
        },
    }
}

/// Recommendations derived from fixed RDA thresholds, most urgent first
pub fn rule_based(trends: &NutrientTrends) -> Vec<Recommendation> {
    if trends.entry_count == 0 {
        return vec![Recommendation {
            category: "general".to_string(),
            title: "Start logging your meals".to_string(),
            message: "Analyze a few meals so NutriFit can spot gaps in your diet.".to_string(),
            priority: Priority::Medium,
        }];
    }

    let mut recommendations: Vec<Recommendation> = trends
        .all()
        .filter_map(|n| {
            let percent = n.percent_of_recommended?;
            if LIMITED.contains(&n.key.as_str()) {
                (percent > EXCESS_ABOVE_PERCENT).then(|| excess(trends, n, percent))
            } else {
                (percent < DEFICIENT_BELOW_PERCENT).then(|| deficiency(trends, n, percent))
            }
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            category: "general".to_string(),
            title: "Keep it up".to_string(),
            message: "Your logged meals meet the recommended amounts. Keep the variety going."
                .to_string(),
            priority: Priority::Low,
        });
    }

    // Stable: keeps display order within a priority
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

pub struct RecommendationService;

impl RecommendationService {
    pub async fn trends(storage: &dyn Storage, user_id: Id) -> Result<NutrientTrends, ApiError> {
        let entries = storage.food_entries(user_id).await?;
        let trends = compute_trends(&entries);
        debug!(user_id, entries = trends.entry_count, "Nutrient trends computed");
        Ok(trends)
    }

    /// Trends with rule-based recommendations
    pub async fn overview(
        storage: &dyn Storage,
        user_id: Id,
    ) -> Result<RecommendationsResponse, ApiError> {
        let trends = Self::trends(storage, user_id).await?;
        Ok(RecommendationsResponse {
            recommendations: rule_based(&trends),
            trends,
            source: ContentSource::Default,
        })
    }

    /// Personalised recommendations from the AI, rule-based as fallback
    pub async fn generate(
        storage: &dyn Storage,
        ai: &AiAssistant,
        user_id: Id,
    ) -> Result<RecommendationsResponse, ApiError> {
        let trends = Self::trends(storage, user_id).await?;

        if ai.is_enabled() {
            match ai.recommendations(&trends).await {
                Ok(recommendations) => {
                    return Ok(RecommendationsResponse {
                        trends,
                        recommendations,
                        source: ContentSource::Ai,
                    })
                }
                Err(e) => warn!(error = %e, user_id, "AI recommendations failed, using rules"),
            }
        }

        Ok(RecommendationsResponse {
            recommendations: rule_based(&trends),
            trends,
            source: ContentSource::Default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nutrifit_shared::{FoodEntry, Nutrients};
    use std::collections::BTreeMap;

    fn entry(calories: f64, protein: f64, sugar: f64, minerals: &[(&str, f64)]) -> FoodEntry {
        FoodEntry {
            id: 1,
            user_id: 1,
            food_name: "Meal".to_string(),
            calories,
            protein,
            carbs: 275.0,
            fats: 78.0,
            nutrients: Nutrients {
                vitamins: BTreeMap::new(),
                minerals: minerals.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                fiber: 28.0,
                sugar,
            },
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_history_asks_for_logging() {
        let recs = rule_based(&compute_trends(&[]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "general");
    }

    #[test]
    fn test_deficiency_and_excess() {
        let trends = compute_trends(&[entry(3000.0, 10.0, 20.0, &[("Sodium", 4000.0)])]);
        let recs = rule_based(&trends);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();

        assert!(titles.contains(&"Increase Protein"));
        assert!(titles.contains(&"Reduce Calories"));
        assert!(titles.contains(&"Reduce Sodium"));
        // Under the limit is fine for sugar
        assert!(!titles.iter().any(|t| t.contains("Sugar")));
        // Low sodium is never a deficiency
        assert!(!titles.contains(&"Increase Sodium"));
        // Carbs, fats and fiber sit at 100%
        assert!(!titles.contains(&"Increase Fiber"));
    }

    #[test]
    fn test_sorted_by_priority() {
        let trends = compute_trends(&[entry(2000.0, 45.0, 80.0, &[])]);
        let recs = rule_based(&trends);
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));
        // Protein at 90% is not flagged
        assert!(!recs.iter().any(|r| r.title == "Increase Protein"));
        assert!(recs.iter().any(|r| r.title == "Reduce Added Sugar"));
        let protein_sources = food_sources("protein").unwrap();
        assert!(protein_sources.contains("legumes"));
    }

    #[tokio::test]
    async fn test_generate_without_ai_uses_rules() {
        let storage = crate::storage::MemStorage::new();
        let response = RecommendationService::generate(&storage, &AiAssistant::disabled(), 1)
            .await
            .unwrap();
        assert_eq!(response.source, ContentSource::Default);
        assert_eq!(response.trends.entry_count, 0);
    }
}
