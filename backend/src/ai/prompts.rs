//! Prompt text for the AI operations
//!
//! Every structured operation asks for a single JSON object; the expected
//! shape is spelled out in the system prompt.

use nutrifit_shared::nutrients::NutrientTrends;
use nutrifit_shared::plans::{DietType, FitnessGoal, FitnessLevel};

pub const FOOD_ANALYSIS_SYSTEM: &str = "You are a nutrition expert analyzing food photos. \
Identify the dish and estimate its nutritional content for the visible portion. \
Respond with a single JSON object of the form: \
{\"foodName\": string, \"calories\": number, \"protein\": number, \"carbs\": number, \
\"fats\": number, \"nutrients\": {\"vitamins\": {name: amount}, \"minerals\": {name: amount}, \
\"fiber\": number, \"sugar\": number}, \
\"alternatives\": [{\"name\": string, \"reason\": string, \"calories\": number}]}. \
Macros are in grams, calories in kcal, vitamins and minerals in mg.";

pub const FOOD_ANALYSIS_USER: &str =
    "Analyze this food image and return the nutritional information as JSON.";

pub const ALTERNATIVES_SYSTEM: &str = "You are a nutrition expert suggesting healthier swaps. \
Respond with a single JSON object of the form: \
{\"alternatives\": [{\"name\": string, \"reason\": string, \"calories\": number}]} \
with three to five alternatives.";

pub const MEAL_PLAN_SYSTEM: &str = "You are a registered dietitian creating daily meal plans. \
Respond with a single JSON object of the form: \
{\"name\": string, \"description\": string, \"calories\": number, \"meals\": \
{\"breakfast\": Meal, \"lunch\": Meal, \"dinner\": Meal, \"snacks\": [Meal]}} where Meal is \
{\"name\": string, \"emoji\": string, \"ingredients\": [string], \"preparation\": string, \
\"calories\": number, \"protein\": number, \"carbs\": number, \"fats\": number}. \
Never include an ingredient the user is allergic to.";

pub const WORKOUT_PLAN_SYSTEM: &str = "You are a certified personal trainer creating workout \
sessions. Respond with a single JSON object of the form: \
{\"name\": string, \"description\": string, \"caloriesBurned\": number, \"exercises\": \
{\"warmup\": [Exercise], \"main\": [Exercise], \"cooldown\": [Exercise]}} where Exercise is \
{\"name\": string, \"emoji\": string, \"sets\": number?, \"reps\": string?, \
\"duration\": string?, \"rest\": string?}. Respect the user's health conditions.";

pub const RECOMMENDATIONS_SYSTEM: &str = "You are a nutrition coach reviewing a user's average \
daily intake against recommended daily allowances. Respond with a single JSON object of the \
form: {\"recommendations\": [{\"category\": string, \"title\": string, \"message\": string, \
\"priority\": \"high\" | \"medium\" | \"low\"}]}. Give three to six concrete, food-based \
recommendations.";

pub const CHAT_SYSTEM: &str = "You are NutriFit, a friendly nutrition and fitness assistant. \
Give practical, evidence-based answers in a few short paragraphs. You are not a doctor; \
suggest consulting a professional for medical conditions.";

fn list_or_none(items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn alternatives_user(food_name: &str, goal: Option<&str>) -> String {
    match goal.map(str::trim).filter(|g| !g.is_empty()) {
        Some(goal) => format!(
            "Suggest healthier alternatives to \"{}\" for someone whose goal is {}.",
            food_name, goal
        ),
        None => format!("Suggest healthier alternatives to \"{}\".", food_name),
    }
}

pub fn meal_plan_user(
    diet: DietType,
    meals_per_day: u8,
    calorie_target: Option<i32>,
    allergies: &[String],
    health_conditions: &[String],
) -> String {
    let target = calorie_target
        .map(|c| format!("{} kcal", c))
        .unwrap_or_else(|| "appropriate for an average adult".to_string());
    format!(
        "Create a {} meal plan with {} meals per day (breakfast, lunch, dinner and {} snack(s)). \
         Daily calorie target: {}. Allergies: {}. Health conditions: {}.",
        diet.label(),
        meals_per_day,
        meals_per_day.saturating_sub(3),
        target,
        list_or_none(allergies),
        list_or_none(health_conditions),
    )
}

pub fn workout_plan_user(
    goal: FitnessGoal,
    level: FitnessLevel,
    duration_minutes: Option<u32>,
    health_conditions: &[String],
) -> String {
    let duration = duration_minutes
        .map(|m| format!("{} minutes", m))
        .unwrap_or_else(|| "about 45 minutes".to_string());
    format!(
        "Create a {} workout session for a {} trainee. Session length: {}. Health conditions: {}.",
        goal.label(),
        level.label().to_lowercase(),
        duration,
        list_or_none(health_conditions),
    )
}

pub fn recommendations_user(trends: &NutrientTrends) -> String {
    let mut lines = vec![format!(
        "Averages over {} logged meals:",
        trends.entry_count
    )];
    for n in trends.all() {
        let pct = n
            .percent_of_recommended
            .map(|p| format!(" ({}% of RDA)", p))
            .unwrap_or_default();
        lines.push(format!("- {}: {:.1} {}{}", n.name, n.average, n.unit, pct));
    }
    lines.join("\n")
}
