//! Meal catalogue: one menu per diet type
//!
//! Meals per day selects how much of the menu is served: 3 is breakfast,
//! lunch and dinner, 4 adds the first snack, 5 adds both.

use super::substitution;
use super::{DefaultMealPlan, DietType, Meal, MealPlanContent};
use crate::errors::PlanError;

struct MealTemplate {
    name: &'static str,
    emoji: &'static str,
    ingredients: &'static [&'static str],
    preparation: &'static str,
    calories: i32,
    protein: i32,
    carbs: i32,
    fats: i32,
}

impl From<&MealTemplate> for Meal {
    fn from(t: &MealTemplate) -> Self {
        Meal {
            name: t.name.to_string(),
            emoji: t.emoji.to_string(),
            ingredients: t.ingredients.iter().map(|i| i.to_string()).collect(),
            preparation: t.preparation.to_string(),
            calories: t.calories,
            protein: t.protein,
            carbs: t.carbs,
            fats: t.fats,
        }
    }
}

struct Menu {
    breakfast: MealTemplate,
    lunch: MealTemplate,
    dinner: MealTemplate,
    snacks: [MealTemplate; 2],
}

const BALANCED: Menu = Menu {
    breakfast: MealTemplate {
        name: "Greek Yogurt Parfait",
        emoji: "🥣",
        ingredients: &[
            "1 cup Greek yogurt",
            "1/2 cup mixed berries",
            "1/4 cup granola with oats",
            "1 tbsp honey",
            "1 tbsp chopped almonds",
        ],
        preparation: "Layer yogurt, berries and granola in a glass. Drizzle with honey and top with almonds.",
        calories: 380,
        protein: 24,
        carbs: 48,
        fats: 11,
    },
    lunch: MealTemplate {
        name: "Grilled Chicken Quinoa Bowl",
        emoji: "🥗",
        ingredients: &[
            "120g grilled chicken breast",
            "3/4 cup cooked quinoa",
            "1 cup mixed greens",
            "1/2 avocado, sliced",
            "Cherry tomatoes",
            "1 tbsp olive oil and lemon dressing",
        ],
        preparation: "Grill the seasoned chicken for 6 minutes per side. Slice and serve over quinoa and greens with avocado, tomatoes and dressing.",
        calories: 560,
        protein: 42,
        carbs: 45,
        fats: 22,
    },
    dinner: MealTemplate {
        name: "Baked Salmon with Vegetables",
        emoji: "🐟",
        ingredients: &[
            "150g salmon fillet",
            "1 cup roasted broccoli",
            "1 medium sweet potato",
            "1 tsp butter",
            "Pinch of salt and pepper",
        ],
        preparation: "Bake salmon and sweet potato at 200°C for 18 minutes. Roast broccoli alongside for the last 12 minutes. Finish with butter.",
        calories: 610,
        protein: 40,
        carbs: 48,
        fats: 26,
    },
    snacks: [
        MealTemplate {
            name: "Apple with Peanut Butter",
            emoji: "🍎",
            ingredients: &["1 medium apple", "1 tbsp peanut butter"],
            preparation: "Slice the apple and serve with peanut butter for dipping.",
            calories: 190,
            protein: 4,
            carbs: 25,
            fats: 8,
        },
        MealTemplate {
            name: "Hummus and Veggie Sticks",
            emoji: "🥕",
            ingredients: &["3 tbsp hummus", "Carrot sticks", "Cucumber slices"],
            preparation: "Cut vegetables into sticks and serve with hummus.",
            calories: 150,
            protein: 5,
            carbs: 16,
            fats: 7,
        },
    ],
};

const VEGETARIAN: Menu = Menu {
    breakfast: MealTemplate {
        name: "Veggie Omelette",
        emoji: "🍳",
        ingredients: &[
            "3 eggs",
            "1/2 cup spinach",
            "1/4 cup diced bell pepper",
            "2 tbsp feta cheese",
            "1 slice whole grain bread",
        ],
        preparation: "Whisk eggs, pour into a hot pan and add vegetables. Fold when set, sprinkle with feta and serve with toast.",
        calories: 410,
        protein: 26,
        carbs: 22,
        fats: 24,
    },
    lunch: MealTemplate {
        name: "Lentil and Roasted Vegetable Salad",
        emoji: "🥗",
        ingredients: &[
            "1 cup cooked lentils",
            "1 cup roasted zucchini and peppers",
            "2 tbsp goat cheese",
            "Handful of arugula",
            "1 tbsp balsamic vinaigrette",
        ],
        preparation: "Toss lentils with roasted vegetables and arugula. Crumble goat cheese on top and dress with vinaigrette.",
        calories: 520,
        protein: 27,
        carbs: 62,
        fats: 17,
    },
    dinner: MealTemplate {
        name: "Whole Wheat Pasta Primavera",
        emoji: "🍝",
        ingredients: &[
            "1.5 cups whole wheat pasta",
            "1 cup mixed vegetables",
            "2 tbsp parmesan cheese",
            "1 tbsp olive oil",
            "2 cloves garlic",
        ],
        preparation: "Cook pasta until al dente. Sauté garlic and vegetables in olive oil, toss with pasta and finish with parmesan.",
        calories: 590,
        protein: 24,
        carbs: 86,
        fats: 17,
    },
    snacks: [
        MealTemplate {
            name: "Cottage Cheese with Pineapple",
            emoji: "🍍",
            ingredients: &["1/2 cup cottage cheese", "1/2 cup pineapple chunks"],
            preparation: "Top cottage cheese with pineapple.",
            calories: 160,
            protein: 14,
            carbs: 18,
            fats: 3,
        },
        MealTemplate {
            name: "Trail Mix",
            emoji: "🥜",
            ingredients: &["1 tbsp almonds", "1 tbsp walnuts", "1 tbsp raisins", "1 tbsp dark chocolate chips"],
            preparation: "Mix and portion into a small bag.",
            calories: 200,
            protein: 5,
            carbs: 16,
            fats: 14,
        },
    ],
};

const VEGAN: Menu = Menu {
    breakfast: MealTemplate {
        name: "Overnight Oats",
        emoji: "🥣",
        ingredients: &[
            "1/2 cup rolled oats",
            "3/4 cup almond milk",
            "1 tbsp chia seeds",
            "1/2 banana, sliced",
            "1 tsp maple syrup",
        ],
        preparation: "Combine oats, almond milk and chia seeds in a jar and refrigerate overnight. Top with banana and maple syrup.",
        calories: 360,
        protein: 11,
        carbs: 58,
        fats: 10,
    },
    lunch: MealTemplate {
        name: "Chickpea Buddha Bowl",
        emoji: "🥙",
        ingredients: &[
            "1 cup roasted chickpeas",
            "1/2 cup brown rice",
            "1 cup kale",
            "1/2 avocado",
            "2 tbsp tahini dressing",
        ],
        preparation: "Roast chickpeas at 200°C for 20 minutes. Assemble over rice and kale with avocado and tahini.",
        calories: 610,
        protein: 21,
        carbs: 72,
        fats: 27,
    },
    dinner: MealTemplate {
        name: "Tofu Stir-Fry",
        emoji: "🥢",
        ingredients: &[
            "150g firm tofu",
            "1 cup broccoli florets",
            "1/2 cup snap peas",
            "2 tbsp soy sauce",
            "3/4 cup white rice",
            "1 tsp sesame oil",
        ],
        preparation: "Press and cube tofu, then pan-fry until golden. Add vegetables and soy sauce, stir-fry for 5 minutes and serve over rice.",
        calories: 540,
        protein: 28,
        carbs: 64,
        fats: 18,
    },
    snacks: [
        MealTemplate {
            name: "Roasted Edamame",
            emoji: "🫛",
            ingredients: &["1 cup edamame", "Pinch of sea salt"],
            preparation: "Roast edamame for 15 minutes and season with sea salt.",
            calories: 180,
            protein: 17,
            carbs: 13,
            fats: 8,
        },
        MealTemplate {
            name: "Banana Almond Smoothie",
            emoji: "🍌",
            ingredients: &["1 banana", "1 cup almond milk", "1 tbsp almond butter"],
            preparation: "Blend until smooth.",
            calories: 230,
            protein: 5,
            carbs: 32,
            fats: 11,
        },
    ],
};

const KETO: Menu = Menu {
    breakfast: MealTemplate {
        name: "Bacon and Avocado Eggs",
        emoji: "🥑",
        ingredients: &[
            "3 eggs",
            "2 slices bacon",
            "1/2 avocado",
            "1 tbsp butter",
        ],
        preparation: "Fry bacon until crisp, then scramble eggs in butter. Serve with sliced avocado.",
        calories: 520,
        protein: 26,
        carbs: 6,
        fats: 44,
    },
    lunch: MealTemplate {
        name: "Cobb Salad",
        emoji: "🥗",
        ingredients: &[
            "120g grilled chicken",
            "2 cups romaine",
            "1 hard-boiled egg",
            "30g blue cheese",
            "1/4 avocado",
            "2 tbsp ranch dressing",
        ],
        preparation: "Arrange chicken, egg, cheese and avocado over romaine and drizzle with ranch.",
        calories: 610,
        protein: 45,
        carbs: 9,
        fats: 44,
    },
    dinner: MealTemplate {
        name: "Garlic Butter Steak with Asparagus",
        emoji: "🥩",
        ingredients: &[
            "180g sirloin steak",
            "1 cup asparagus",
            "1 tbsp garlic butter",
            "Pinch of salt",
        ],
        preparation: "Sear steak 4 minutes per side, rest, then baste with garlic butter. Roast asparagus for 10 minutes.",
        calories: 640,
        protein: 48,
        carbs: 7,
        fats: 46,
    },
    snacks: [
        MealTemplate {
            name: "Cheese and Olives",
            emoji: "🧀",
            ingredients: &["30g cheddar cheese", "8 green olives"],
            preparation: "Cube cheese and serve with olives.",
            calories: 170,
            protein: 7,
            carbs: 2,
            fats: 15,
        },
        MealTemplate {
            name: "Macadamia Nuts",
            emoji: "🌰",
            ingredients: &["30g macadamia nuts"],
            preparation: "Portion into a small bowl.",
            calories: 200,
            protein: 2,
            carbs: 4,
            fats: 21,
        },
    ],
};

const HIGH_PROTEIN: Menu = Menu {
    breakfast: MealTemplate {
        name: "Protein Pancakes",
        emoji: "🥞",
        ingredients: &[
            "1 scoop whey protein",
            "1/2 cup oats",
            "2 eggs",
            "1/4 cup milk",
            "1/2 cup blueberries",
        ],
        preparation: "Blend protein, oats, eggs and milk into a batter. Cook small pancakes on a non-stick pan and top with blueberries.",
        calories: 480,
        protein: 42,
        carbs: 44,
        fats: 14,
    },
    lunch: MealTemplate {
        name: "Turkey and Black Bean Wrap",
        emoji: "🌯",
        ingredients: &[
            "150g sliced turkey breast",
            "1/2 cup black beans",
            "1 whole wheat tortilla",
            "2 tbsp Greek yogurt",
            "Lettuce and salsa",
        ],
        preparation: "Warm the tortilla, fill with turkey, beans, lettuce and salsa, add a dollop of yogurt and roll.",
        calories: 560,
        protein: 52,
        carbs: 52,
        fats: 12,
    },
    dinner: MealTemplate {
        name: "Garlic Shrimp with Brown Rice",
        emoji: "🍤",
        ingredients: &[
            "200g shrimp",
            "3/4 cup brown rice",
            "1 cup green beans",
            "1 tbsp olive oil",
            "2 cloves garlic",
        ],
        preparation: "Sauté garlic in olive oil, add shrimp and cook 2 minutes per side. Serve with rice and steamed green beans.",
        calories: 590,
        protein: 50,
        carbs: 58,
        fats: 15,
    },
    snacks: [
        MealTemplate {
            name: "Protein Shake",
            emoji: "🥤",
            ingredients: &["1 scoop whey protein", "1 cup milk"],
            preparation: "Shake or blend until smooth.",
            calories: 240,
            protein: 33,
            carbs: 14,
            fats: 6,
        },
        MealTemplate {
            name: "Hard-Boiled Eggs",
            emoji: "🥚",
            ingredients: &["2 hard-boiled eggs", "Pinch of salt"],
            preparation: "Boil eggs for 10 minutes, cool and peel.",
            calories: 155,
            protein: 13,
            carbs: 1,
            fats: 11,
        },
    ],
};

fn menu(diet: DietType) -> &'static Menu {
    match diet {
        DietType::Balanced => &BALANCED,
        DietType::Vegetarian => &VEGETARIAN,
        DietType::Vegan => &VEGAN,
        DietType::Keto => &KETO,
        DietType::HighProtein => &HIGH_PROTEIN,
    }
}

/// Select the catalogue plan for `diet` and `meals_per_day`, then apply the
/// allergy and health-condition substitutions
pub fn default_meal_plan(
    diet: DietType,
    meals_per_day: u8,
    allergies: &[String],
    health_conditions: &[String],
) -> Result<DefaultMealPlan, PlanError> {
    let snack_count = match meals_per_day {
        3 => 0,
        4 => 1,
        5 => 2,
        other => return Err(PlanError::UnsupportedMealsPerDay(other)),
    };

    let menu = menu(diet);
    let mut content = MealPlanContent {
        breakfast: Meal::from(&menu.breakfast),
        lunch: Meal::from(&menu.lunch),
        dinner: Meal::from(&menu.dinner),
        snacks: menu.snacks[..snack_count].iter().map(Meal::from).collect(),
    };

    let substitutions = substitution::for_meal_plan(allergies, health_conditions);
    substitution::apply_to_meals(&mut content, &substitutions);

    let mut description = format!(
        "{} day plan with {} meals.",
        diet.label(),
        meals_per_day
    );
    let flags: Vec<&str> = allergies
        .iter()
        .chain(health_conditions.iter())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !flags.is_empty() {
        description.push_str(&format!(" Adjusted for: {}.", flags.join(", ")));
    }

    Ok(DefaultMealPlan {
        name: format!("{} Meal Plan", diet.label()),
        description,
        calories: content.total_calories(),
        content,
    })
}
