//! Allergy and health-condition substitution
//!
//! A [`Substitution`] pairs a lowercase keyword with a replacement. Applying
//! a list of substitutions to a string replaces the whole string with the
//! replacement of the first keyword it contains (case-insensitive); strings
//! that contain no keyword are left untouched. Each string is rewritten at
//! most once, so a replacement never triggers a second substitution.
//!
//! Which substitutions apply is decided by rules: a rule fires when any user
//! flag (e.g. "Tree nuts", "type 2 diabetes") contains one of its triggers.

use super::{MealPlanContent, WorkoutPlanContent};

/// Replace any item containing `keyword` with `replacement`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub keyword: &'static str,
    pub replacement: &'static str,
}

const fn sub(keyword: &'static str, replacement: &'static str) -> Substitution {
    Substitution {
        keyword,
        replacement,
    }
}

struct Rule {
    triggers: &'static [&'static str],
    substitutions: &'static [Substitution],
}

const ALLERGY_RULES: &[Rule] = &[
    // Dairy
    Rule {
        triggers: &["dairy", "lactose", "milk", "casein"],
        substitutions: &[
            sub("greek yogurt", "1 cup dairy-free coconut yogurt"),
            sub("yogurt", "dairy-free coconut yogurt"),
            sub("cottage cheese", "1/2 cup silken tofu"),
            sub("cheese", "dairy-free cheese alternative"),
            sub("cup milk", "1 cup oat milk"),
            sub("whey protein", "1 scoop pea protein"),
            sub("garlic butter", "1 tbsp garlic-infused olive oil"),
            sub("tbsp butter", "1 tbsp olive oil"),
            sub("tsp butter", "1 tsp olive oil"),
        ],
    },
    // Peanuts and tree nuts
    Rule {
        triggers: &["nut", "almond", "walnut", "cashew", "macadamia"],
        substitutions: &[
            sub("peanut butter", "1 tbsp sunflower seed butter"),
            sub("almond butter", "1 tbsp sunflower seed butter"),
            sub("almond milk", "3/4 cup oat milk"),
            sub("almonds", "1 tbsp pumpkin seeds"),
            sub("walnuts", "1 tbsp sunflower seeds"),
            sub("macadamia", "30g roasted pumpkin seeds"),
        ],
    },
    // Gluten
    Rule {
        triggers: &["gluten", "wheat", "celiac", "coeliac"],
        substitutions: &[
            sub("granola", "1/4 cup gluten-free granola"),
            sub("bread", "1 slice gluten-free bread"),
            sub("pasta", "1.5 cups gluten-free pasta"),
            sub("tortilla", "2 corn tortillas"),
            sub("oats", "1/2 cup certified gluten-free oats"),
            sub("soy sauce", "2 tbsp tamari (gluten-free)"),
        ],
    },
    // Eggs
    Rule {
        triggers: &["egg"],
        substitutions: &[
            sub("hard-boiled egg", "1/4 cup roasted chickpeas"),
            sub("egg", "2 flax eggs (ground flaxseed and water)"),
        ],
    },
    // Shellfish
    Rule {
        triggers: &["shellfish", "shrimp", "crustacean", "seafood"],
        substitutions: &[sub("shrimp", "200g chicken breast")],
    },
    // Fish
    Rule {
        triggers: &["fish", "seafood"],
        substitutions: &[sub("salmon", "150g chicken breast")],
    },
    // Soy
    Rule {
        triggers: &["soy"],
        substitutions: &[
            sub("soy sauce", "2 tbsp coconut aminos"),
            sub("tofu", "1 cup chickpeas"),
            sub("edamame", "1 cup roasted chickpeas"),
        ],
    },
];

const DIET_CONDITION_RULES: &[Rule] = &[
    // Diabetes
    Rule {
        triggers: &["diabet", "blood sugar", "insulin", "prediabet"],
        substitutions: &[
            sub("honey", "1 tsp stevia"),
            sub("maple syrup", "1 tsp stevia"),
            sub("white rice", "3/4 cup cauliflower rice"),
            sub("raisins", "1 tbsp pumpkin seeds"),
            sub("chocolate chips", "1 tbsp cacao nibs"),
            sub("pineapple", "1/2 cup strawberries"),
        ],
    },
    // Hypertension
    Rule {
        triggers: &["hypertension", "blood pressure", "sodium"],
        substitutions: &[
            sub("soy sauce", "2 tbsp low-sodium soy sauce"),
            sub("salt", "Herbs and lemon zest (no added salt)"),
            sub("bacon", "2 slices low-sodium turkey bacon"),
            sub("olives", "1/4 cucumber, sliced"),
        ],
    },
    // Heart disease / cholesterol
    Rule {
        triggers: &["heart", "cholesterol", "cardio"],
        substitutions: &[
            sub("garlic butter", "1 tbsp garlic-infused olive oil"),
            sub("tbsp butter", "1 tbsp olive oil"),
            sub("tsp butter", "1 tsp olive oil"),
            sub("bacon", "2 slices turkey bacon"),
            sub("steak", "150g skinless chicken breast"),
        ],
    },
];

const EXERCISE_CONDITION_RULES: &[Rule] = &[
    // Knees and joints
    Rule {
        triggers: &["knee", "joint", "arthritis", "ankle"],
        substitutions: &[
            sub("jumping jacks", "Step Jacks"),
            sub("jump", "Step-Ups (low platform)"),
            sub("burpee", "Incline Push-Ups"),
            sub("high knees", "Marching in Place"),
            sub("lunge", "Glute Bridges"),
            sub("running", "Stationary Cycling"),
            sub("jog", "Stationary Cycling"),
        ],
    },
    // Back
    Rule {
        triggers: &["back", "spine", "disc", "sciatica"],
        substitutions: &[
            sub("deadlift", "Glute Bridges"),
            sub("bent-over row", "Seated Cable Row"),
            sub("sit-up", "Dead Bug"),
            sub("crunch", "Bird Dog"),
            sub("good morning", "Hip Hinge with Dowel"),
        ],
    },
    // Blood pressure and heart conditions
    Rule {
        triggers: &["hypertension", "blood pressure", "heart", "cardiac"],
        substitutions: &[
            sub("sprint", "Brisk Walking Intervals"),
            sub("burpee", "Step-Ups"),
            sub("hiit", "Moderate Steady-State Cardio"),
        ],
    },
    // Asthma
    Rule {
        triggers: &["asthma", "copd"],
        substitutions: &[
            sub("sprint", "Brisk Walking Intervals"),
            sub("hiit", "Low-Intensity Circuit"),
        ],
    },
];

fn collect(flags: &[String], rule_sets: &[&[Rule]]) -> Vec<Substitution> {
    let flags: Vec<String> = flags
        .iter()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect();

    let mut result: Vec<Substitution> = Vec::new();
    for rule in rule_sets.iter().flat_map(|rules| rules.iter()) {
        let fires = flags
            .iter()
            .any(|flag| rule.triggers.iter().any(|t| flag.contains(t)));
        if !fires {
            continue;
        }
        for s in rule.substitutions {
            if !result.iter().any(|existing| existing.keyword == s.keyword) {
                result.push(*s);
            }
        }
    }
    result
}

/// Ingredient substitutions for the given allergies
pub fn for_allergies(allergies: &[String]) -> Vec<Substitution> {
    collect(allergies, &[ALLERGY_RULES])
}

/// Ingredient substitutions for the given health conditions
///
/// Intolerances are often entered as conditions ("celiac disease", "lactose
/// intolerance"), so allergy rules are consulted as well.
pub fn for_diet_conditions(conditions: &[String]) -> Vec<Substitution> {
    collect(conditions, &[DIET_CONDITION_RULES, ALLERGY_RULES])
}

/// Every ingredient substitution for a meal plan, allergies first
pub fn for_meal_plan(allergies: &[String], conditions: &[String]) -> Vec<Substitution> {
    let mut result = for_allergies(allergies);
    for s in for_diet_conditions(conditions) {
        if !result.iter().any(|existing| existing.keyword == s.keyword) {
            result.push(s);
        }
    }
    result
}

/// Exercise substitutions for the given health conditions
pub fn for_exercise_conditions(conditions: &[String]) -> Vec<Substitution> {
    collect(conditions, &[EXERCISE_CONDITION_RULES])
}

/// The first substitution whose keyword `item` contains
pub fn find<'a>(item: &str, substitutions: &'a [Substitution]) -> Option<&'a Substitution> {
    let lower = item.to_lowercase();
    substitutions.iter().find(|s| lower.contains(s.keyword))
}

/// Rewrite matching items in place; returns how many were replaced
pub fn apply(items: &mut [String], substitutions: &[Substitution]) -> usize {
    let mut replaced = 0;
    for item in items.iter_mut() {
        if let Some(s) = find(item, substitutions) {
            *item = s.replacement.to_string();
            replaced += 1;
        }
    }
    replaced
}

/// Apply ingredient substitutions to every meal
pub fn apply_to_meals(content: &mut MealPlanContent, substitutions: &[Substitution]) -> usize {
    if substitutions.is_empty() {
        return 0;
    }
    content
        .meals_mut()
        .map(|meal| apply(&mut meal.ingredients, substitutions))
        .sum()
}

/// Apply exercise substitutions to every exercise name
pub fn apply_to_workout(
    content: &mut WorkoutPlanContent,
    substitutions: &[Substitution],
) -> usize {
    if substitutions.is_empty() {
        return 0;
    }
    let mut replaced = 0;
    for exercise in content.exercises_mut() {
        if let Some(s) = find(&exercise.name, substitutions) {
            exercise.name = s.replacement.to_string();
            replaced += 1;
        }
    }
    replaced
}
