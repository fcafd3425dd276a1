//! Static healthier-alternative suggestions
//!
//! Used when AI-backed suggestions are unavailable. Entries are matched by
//! keyword against the lowercased food name; the first matching entry wins.

use crate::types::FoodAlternative;

struct Suggestion {
    name: &'static str,
    reason: &'static str,
    calories: f64,
}

struct Entry {
    keywords: &'static [&'static str],
    suggestions: &'static [Suggestion],
}

const TABLE: &[Entry] = &[
    Entry {
        keywords: &["pizza"],
        suggestions: &[
            Suggestion { name: "Cauliflower crust veggie pizza", reason: "Fewer refined carbs and more vegetables", calories: 220.0 },
            Suggestion { name: "Whole wheat pita pizza", reason: "Smaller portion with whole grains", calories: 260.0 },
        ],
    },
    Entry {
        keywords: &["burger", "cheeseburger"],
        suggestions: &[
            Suggestion { name: "Grilled chicken burger on whole grain bun", reason: "Leaner protein with less saturated fat", calories: 380.0 },
            Suggestion { name: "Black bean burger lettuce wrap", reason: "High fiber and no refined bun", calories: 290.0 },
        ],
    },
    Entry {
        keywords: &["fries", "chips", "crisps"],
        suggestions: &[
            Suggestion { name: "Baked sweet potato wedges", reason: "Baked instead of fried, rich in vitamin A", calories: 160.0 },
            Suggestion { name: "Air-popped popcorn", reason: "Whole grain snack with far less fat", calories: 100.0 },
        ],
    },
    Entry {
        keywords: &["soda", "cola", "soft drink", "lemonade"],
        suggestions: &[
            Suggestion { name: "Sparkling water with citrus", reason: "No added sugar", calories: 5.0 },
            Suggestion { name: "Unsweetened iced tea", reason: "Hydrating with antioxidants and no sugar", calories: 2.0 },
        ],
    },
    Entry {
        keywords: &["ice cream", "gelato"],
        suggestions: &[
            Suggestion { name: "Frozen banana nice cream", reason: "Naturally sweet with no added sugar", calories: 120.0 },
            Suggestion { name: "Greek yogurt with berries", reason: "More protein and less sugar", calories: 150.0 },
        ],
    },
    Entry {
        keywords: &["cake", "donut", "doughnut", "pastry", "cookie", "brownie"],
        suggestions: &[
            Suggestion { name: "Fresh fruit with dark chocolate", reason: "Satisfies a sweet craving with fiber and less sugar", calories: 140.0 },
            Suggestion { name: "Oat and banana muffin", reason: "Whole grains with no refined sugar", calories: 180.0 },
        ],
    },
    Entry {
        keywords: &["pasta", "spaghetti", "noodle"],
        suggestions: &[
            Suggestion { name: "Zucchini noodles with marinara", reason: "Far fewer carbs and more vegetables", calories: 150.0 },
            Suggestion { name: "Whole wheat pasta with vegetables", reason: "More fiber for steadier blood sugar", calories: 320.0 },
        ],
    },
    Entry {
        keywords: &["fried chicken", "nugget", "wings"],
        suggestions: &[
            Suggestion { name: "Oven-baked chicken breast", reason: "Same protein without deep-frying", calories: 230.0 },
            Suggestion { name: "Grilled chicken skewers", reason: "Lean protein with minimal added fat", calories: 210.0 },
        ],
    },
    Entry {
        keywords: &["white rice", "fried rice"],
        suggestions: &[
            Suggestion { name: "Brown rice", reason: "Whole grain with more fiber and magnesium", calories: 215.0 },
            Suggestion { name: "Cauliflower rice", reason: "Low-carb swap with extra vitamin C", calories: 40.0 },
        ],
    },
    Entry {
        keywords: &["cereal"],
        suggestions: &[
            Suggestion { name: "Overnight oats with berries", reason: "Whole grains and no added sugar", calories: 280.0 },
            Suggestion { name: "Plain Greek yogurt with nuts", reason: "Protein-rich breakfast with healthy fats", calories: 230.0 },
        ],
    },
];

const GENERIC: &[Suggestion] = &[
    Suggestion { name: "Mixed green salad with lean protein", reason: "Nutrient dense and lower in calories", calories: 300.0 },
    Suggestion { name: "Vegetable stir-fry with tofu", reason: "High in fiber and plant protein", calories: 320.0 },
    Suggestion { name: "Fresh fruit bowl", reason: "Natural sugars with vitamins and fiber", calories: 120.0 },
];

fn to_alternatives(suggestions: &[Suggestion]) -> Vec<FoodAlternative> {
    suggestions
        .iter()
        .map(|s| FoodAlternative {
            name: s.name.to_string(),
            reason: s.reason.to_string(),
            calories: Some(s.calories),
        })
        .collect()
}

/// Healthier alternatives for `food_name`, falling back to generic advice
pub fn default_alternatives(food_name: &str) -> Vec<FoodAlternative> {
    let food = food_name.to_lowercase();
    let suggestions = TABLE
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| food.contains(k)))
        .map(|entry| entry.suggestions)
        .unwrap_or(GENERIC);
    to_alternatives(suggestions)
}
