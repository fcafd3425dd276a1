//! Health report assembly
//!
//! [`build_pages`] lays the report out into pages of draw operations;
//! [`render_pdf`] turns those pages into a PDF. Layout is pure so it can be
//! tested without decoding PDFs.

pub mod layout;
mod render;

pub use layout::{DrawOp, FontWeight, Page, ReportLayout};
pub use render::render_pdf;

use chrono::{DateTime, Utc};
use layout::LEFT_MARGIN_MM;
use nutrifit_shared::plans::{Exercise, MealPlanContent, WorkoutPlanContent};
use nutrifit_shared::{FoodEntry, MealPlan, NutrientTrends, User, WorkoutPlan};

const TITLE_SIZE: f32 = 20.0;
const SECTION_SIZE: f32 = 14.0;
const SUBHEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;

/// Everything that goes into a user's report
#[derive(Debug, Clone)]
pub struct ReportData {
    pub user: User,
    pub generated_at: DateTime<Utc>,
    pub trends: NutrientTrends,
    /// Newest first
    pub entries: Vec<FoodEntry>,
    pub meal_plans: Vec<MealPlan>,
    pub workout_plans: Vec<WorkoutPlan>,
}

fn cells(columns: &[f32], values: Vec<String>) -> Vec<(f32, String)> {
    columns.iter().copied().zip(values).collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

fn section(layout: &mut ReportLayout, title: &str) {
    layout.gap(6.0);
    layout.line(LEFT_MARGIN_MM, title, SECTION_SIZE, FontWeight::Bold);
    layout.rule();
}

fn header(layout: &mut ReportLayout, data: &ReportData) {
    layout.line(LEFT_MARGIN_MM, "NutriFit Health Report", TITLE_SIZE, FontWeight::Bold);
    layout.line(
        LEFT_MARGIN_MM,
        format!("Prepared for {}", data.user.display_name()),
        SUBHEADING_SIZE,
        FontWeight::Regular,
    );
    layout.line(
        LEFT_MARGIN_MM,
        format!("Generated {}", data.generated_at.format("%B %-d, %Y")),
        BODY_SIZE,
        FontWeight::Regular,
    );
}

fn trends_table(layout: &mut ReportLayout, trends: &NutrientTrends) {
    section(layout, "Nutrient Trends");
    layout.paragraph(
        &format!("Average per logged meal across {} entries.", trends.entry_count),
        BODY_SIZE,
        FontWeight::Regular,
    );

    const COLUMNS: [f32; 4] = [LEFT_MARGIN_MM, 80.0, 120.0, 160.0];
    layout.row(
        &cells(
            &COLUMNS,
            vec![
                "Nutrient".into(),
                "Average".into(),
                "Recommended".into(),
                "% of RDA".into(),
            ],
        ),
        TABLE_SIZE,
        FontWeight::Bold,
    );
    for n in trends.all() {
        let recommended = n
            .recommended
            .map(|r| format!("{} {}", r, n.unit))
            .unwrap_or_else(|| "-".to_string());
        let percent = n
            .percent_of_recommended
            .map(|p| format!("{:.0}%", p))
            .unwrap_or_else(|| "-".to_string());
        layout.row(
            &cells(
                &COLUMNS,
                vec![
                    n.name.clone(),
                    format!("{:.1} {}", n.average, n.unit).trim().to_string(),
                    recommended,
                    percent,
                ],
            ),
            TABLE_SIZE,
            FontWeight::Regular,
        );
    }
}

fn food_history(layout: &mut ReportLayout, entries: &[FoodEntry]) {
    section(layout, "Food History");
    if entries.is_empty() {
        layout.paragraph("No meals logged yet.", BODY_SIZE, FontWeight::Regular);
        return;
    }

    const COLUMNS: [f32; 6] = [LEFT_MARGIN_MM, 45.0, 120.0, 140.0, 160.0, 180.0];
    layout.row(
        &cells(
            &COLUMNS,
            vec![
                "Date".into(),
                "Food".into(),
                "kcal".into(),
                "Protein".into(),
                "Carbs".into(),
                "Fats".into(),
            ],
        ),
        TABLE_SIZE,
        FontWeight::Bold,
    );
    for e in entries {
        layout.row(
            &cells(
                &COLUMNS,
                vec![
                    e.created_at.format("%Y-%m-%d").to_string(),
                    truncate(&e.food_name, 40),
                    format!("{:.0}", e.calories),
                    format!("{:.1}g", e.protein),
                    format!("{:.1}g", e.carbs),
                    format!("{:.1}g", e.fats),
                ],
            ),
            TABLE_SIZE,
            FontWeight::Regular,
        );
    }
}

fn meal_plans(layout: &mut ReportLayout, plans: &[MealPlan]) {
    section(layout, "Meal Plans");
    if plans.is_empty() {
        layout.paragraph("No meal plans yet.", BODY_SIZE, FontWeight::Regular);
        return;
    }

    for plan in plans {
        layout.gap(2.0);
        layout.line(
            LEFT_MARGIN_MM,
            format!("{} ({} kcal/day)", plan.name, plan.calories),
            SUBHEADING_SIZE,
            FontWeight::Bold,
        );
        if let Some(description) = plan.description.as_deref() {
            layout.paragraph(description, BODY_SIZE, FontWeight::Regular);
        }

        // Stored meals are freeform; anything unreadable prints as empty
        let content: MealPlanContent =
            serde_json::from_value(plan.meals.clone()).unwrap_or_default();
        let labelled = [
            ("Breakfast", &content.breakfast),
            ("Lunch", &content.lunch),
            ("Dinner", &content.dinner),
        ]
        .into_iter()
        .chain(content.snacks.iter().map(|s| ("Snack", s)));
        for (label, meal) in labelled {
            if meal.name.trim().is_empty() {
                continue;
            }
            layout.paragraph(
                &format!("{}: {} ({} kcal)", label, meal.name, meal.calories),
                BODY_SIZE,
                FontWeight::Regular,
            );
        }
    }
}

fn exercise_list(exercises: &[Exercise]) -> String {
    exercises
        .iter()
        .map(|e| match (e.sets, e.reps.as_deref(), e.duration.as_deref()) {
            (Some(sets), Some(reps), _) => format!("{} {}x{}", e.name, sets, reps),
            (_, _, Some(duration)) => format!("{} {}", e.name, duration),
            _ => e.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn workout_plans(layout: &mut ReportLayout, plans: &[WorkoutPlan]) {
    section(layout, "Workout Plans");
    if plans.is_empty() {
        layout.paragraph("No workout plans yet.", BODY_SIZE, FontWeight::Regular);
        return;
    }

    for plan in plans {
        layout.gap(2.0);
        layout.line(
            LEFT_MARGIN_MM,
            format!("{} (about {} kcal)", plan.name, plan.calories_burned),
            SUBHEADING_SIZE,
            FontWeight::Bold,
        );
        if let Some(description) = plan.description.as_deref() {
            layout.paragraph(description, BODY_SIZE, FontWeight::Regular);
        }

        let content: WorkoutPlanContent =
            serde_json::from_value(plan.exercises.clone()).unwrap_or_default();
        for (label, block) in [
            ("Warm-up", &content.warmup),
            ("Main", &content.main),
            ("Cool-down", &content.cooldown),
        ] {
            if block.is_empty() {
                continue;
            }
            layout.paragraph(
                &format!("{}: {}", label, exercise_list(block)),
                BODY_SIZE,
                FontWeight::Regular,
            );
        }
    }
}

/// Lay out the full report
pub fn build_pages(data: &ReportData, threshold_mm: f32) -> Vec<Page> {
    let mut layout = ReportLayout::new(threshold_mm);
    header(&mut layout, data);
    trends_table(&mut layout, &data.trends);
    food_history(&mut layout, &data.entries);
    meal_plans(&mut layout, &data.meal_plans);
    workout_plans(&mut layout, &data.workout_plans);
    layout.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrifit_shared::{compute_trends, Nutrients};
    use serde_json::json;

    fn user() -> User {
        User {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            full_name: Some("Ada Lovelace".to_string()),
            password: String::new(),
            profile_pic: None,
            created_at: Utc::now(),
        }
    }

    fn entry(i: i64) -> FoodEntry {
        FoodEntry {
            id: i,
            user_id: 1,
            food_name: format!("Meal {}", i),
            calories: 500.0,
            protein: 20.0,
            carbs: 60.0,
            fats: 15.0,
            nutrients: Nutrients::default(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn data(entries: usize) -> ReportData {
        let entries: Vec<FoodEntry> = (1..=entries as i64).map(entry).collect();
        ReportData {
            user: user(),
            generated_at: Utc::now(),
            trends: compute_trends(&entries),
            entries,
            meal_plans: vec![MealPlan {
                id: 1,
                user_id: 1,
                name: "Keto Meal Plan".to_string(),
                description: Some("Keto day plan with 3 meals.".to_string()),
                calories: 1800,
                meals: json!({"breakfast": {"name": "Eggs", "calories": 400}}),
                created_at: Utc::now(),
            }],
            workout_plans: vec![WorkoutPlan {
                id: 1,
                user_id: 1,
                name: "Beginner Endurance Workout".to_string(),
                description: None,
                exercises: json!({"main": [{"name": "Rowing", "duration": "20 minutes"}]}),
                calories_burned: 280,
                created_at: Utc::now(),
            }],
        }
    }

    fn texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                DrawOp::Line { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_report_sections() {
        let pages = build_pages(&data(2), 270.0);
        let texts = texts(&pages);

        assert!(texts.contains(&"Prepared for Ada Lovelace".to_string()));
        for heading in ["Nutrient Trends", "Food History", "Meal Plans", "Workout Plans"] {
            assert!(texts.iter().any(|t| t == heading), "missing {}", heading);
        }
        assert!(texts.contains(&"Meal 2".to_string()));
        assert!(texts.contains(&"Breakfast: Eggs (400 kcal)".to_string()));
        assert!(texts.contains(&"Main: Rowing 20 minutes".to_string()));
    }

    #[test]
    fn test_long_history_spans_pages_within_threshold() {
        let pages = build_pages(&data(200), 270.0);
        assert!(pages.len() > 2);
        for page in &pages {
            assert!(page.ops.iter().all(|op| op.y() <= 270.0));
        }
    }

    #[test]
    fn test_unreadable_plan_json_is_skipped() {
        let mut d = data(0);
        d.meal_plans[0].meals = json!("not an object");
        let texts = texts(&build_pages(&d, 270.0));
        assert!(texts.contains(&"No meals logged yet.".to_string()));
        assert!(texts.contains(&"Keto Meal Plan (1800 kcal/day)".to_string()));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long food name", 10), "a very ...");
    }
}
