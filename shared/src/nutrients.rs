//! Nutrient trend aggregation
//!
//! Averages calories, macros, vitamins and minerals over a list of food
//! entries and compares each average to a fixed Recommended Dietary
//! Allowance (RDA). An empty list produces the zero result: every average
//! and percentage is 0.
//!
//! Also hosts the lenient number parsing used to normalize AI output, where
//! values may arrive as numbers, numeric strings or strings with units
//! ("12.5g", "~200 kcal").

use crate::models::{FoodEntry, Nutrients};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Daily reference amount for one nutrient
#[derive(Debug, Clone, Copy)]
pub struct Rda {
    pub key: &'static str,
    pub label: &'static str,
    pub amount: f64,
    pub unit: &'static str,
}

const fn rda(key: &'static str, label: &'static str, amount: f64, unit: &'static str) -> Rda {
    Rda {
        key,
        label,
        amount,
        unit,
    }
}

pub const CALORIES_RDA: Rda = rda("calories", "Calories", 2000.0, "kcal");
pub const PROTEIN_RDA: Rda = rda("protein", "Protein", 50.0, "g");
pub const CARBS_RDA: Rda = rda("carbs", "Carbohydrates", 275.0, "g");
pub const FATS_RDA: Rda = rda("fats", "Fats", 78.0, "g");
pub const FIBER_RDA: Rda = rda("fiber", "Fiber", 28.0, "g");
pub const SUGAR_RDA: Rda = rda("sugar", "Added Sugar", 50.0, "g");

pub const VITAMIN_RDA: &[Rda] = &[
    rda("a", "Vitamin A", 900.0, "mcg"),
    rda("b1", "Vitamin B1", 1.2, "mg"),
    rda("b2", "Vitamin B2", 1.3, "mg"),
    rda("b3", "Vitamin B3", 16.0, "mg"),
    rda("b6", "Vitamin B6", 1.7, "mg"),
    rda("b9", "Folate", 400.0, "mcg"),
    rda("b12", "Vitamin B12", 2.4, "mcg"),
    rda("c", "Vitamin C", 90.0, "mg"),
    rda("d", "Vitamin D", 20.0, "mcg"),
    rda("e", "Vitamin E", 15.0, "mg"),
    rda("k", "Vitamin K", 120.0, "mcg"),
];

pub const MINERAL_RDA: &[Rda] = &[
    rda("calcium", "Calcium", 1000.0, "mg"),
    rda("iron", "Iron", 18.0, "mg"),
    rda("magnesium", "Magnesium", 420.0, "mg"),
    rda("phosphorus", "Phosphorus", 1250.0, "mg"),
    rda("potassium", "Potassium", 4700.0, "mg"),
    rda("sodium", "Sodium", 2300.0, "mg"),
    rda("zinc", "Zinc", 11.0, "mg"),
    rda("selenium", "Selenium", 55.0, "mcg"),
];

/// Average intake of one nutrient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutrientAverage {
    pub key: String,
    pub name: String,
    pub average: f64,
    pub unit: String,
    /// Daily reference amount, if one is known for this nutrient
    pub recommended: Option<f64>,
    /// `average / recommended * 100`, rounded to one decimal
    pub percent_of_recommended: Option<f64>,
}

impl NutrientAverage {
    fn from_rda(rda: &Rda, average: f64) -> Self {
        Self {
            key: rda.key.to_string(),
            name: rda.label.to_string(),
            average,
            unit: rda.unit.to_string(),
            recommended: Some(rda.amount),
            percent_of_recommended: Some(percent_of(average, rda.amount)),
        }
    }
}

/// Averages over a user's food history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutrientTrends {
    pub entry_count: usize,
    pub calories: NutrientAverage,
    pub protein: NutrientAverage,
    pub carbs: NutrientAverage,
    pub fats: NutrientAverage,
    pub fiber: NutrientAverage,
    pub sugar: NutrientAverage,
    pub vitamins: Vec<NutrientAverage>,
    pub minerals: Vec<NutrientAverage>,
}

impl NutrientTrends {
    /// Calories and macros, in display order
    pub fn macros(&self) -> [&NutrientAverage; 6] {
        [
            &self.calories,
            &self.protein,
            &self.carbs,
            &self.fats,
            &self.fiber,
            &self.sugar,
        ]
    }

    /// Every tracked nutrient
    pub fn all(&self) -> impl Iterator<Item = &NutrientAverage> {
        self.macros()
            .into_iter()
            .chain(self.vitamins.iter())
            .chain(self.minerals.iter())
    }

    /// Nutrients with a known RDA whose average is below `percent` of it
    pub fn below(&self, percent: f64) -> Vec<&NutrientAverage> {
        self.all()
            .filter(|n| matches!(n.percent_of_recommended, Some(p) if p < percent))
            .collect()
    }

    /// Look up a nutrient by its normalized key
    pub fn get(&self, key: &str) -> Option<&NutrientAverage> {
        let key = normalize_key(key);
        self.all().find(|n| n.key == key)
    }
}

/// Compute nutrient averages over `entries`
pub fn compute_trends(entries: &[FoodEntry]) -> NutrientTrends {
    let n = entries.len();
    let mean_of = |field: fn(&FoodEntry) -> f64| {
        if n == 0 {
            0.0
        } else {
            entries.iter().map(field).sum::<f64>() / n as f64
        }
    };

    NutrientTrends {
        entry_count: n,
        calories: NutrientAverage::from_rda(&CALORIES_RDA, mean_of(|e: &FoodEntry| e.calories)),
        protein: NutrientAverage::from_rda(&PROTEIN_RDA, mean_of(|e: &FoodEntry| e.protein)),
        carbs: NutrientAverage::from_rda(&CARBS_RDA, mean_of(|e: &FoodEntry| e.carbs)),
        fats: NutrientAverage::from_rda(&FATS_RDA, mean_of(|e: &FoodEntry| e.fats)),
        fiber: NutrientAverage::from_rda(&FIBER_RDA, mean_of(|e: &FoodEntry| e.nutrients.fiber)),
        sugar: NutrientAverage::from_rda(&SUGAR_RDA, mean_of(|e: &FoodEntry| e.nutrients.sugar)),
        vitamins: average_group(entries.iter().map(|e| &e.nutrients.vitamins), VITAMIN_RDA, n),
        minerals: average_group(entries.iter().map(|e| &e.nutrients.minerals), MINERAL_RDA, n),
    }
}

/// Average a vitamin or mineral group. Known nutrients come first in
/// reference order, unknown ones follow sorted by key with no RDA.
fn average_group<'a>(
    maps: impl Iterator<Item = &'a BTreeMap<String, f64>>,
    references: &[Rda],
    n: usize,
) -> Vec<NutrientAverage> {
    let mut sums: BTreeMap<String, (String, f64)> = BTreeMap::new();
    for map in maps {
        // One value per nutrient per entry; the first spelling wins
        let mut seen = BTreeSet::new();
        for (name, value) in map {
            let key = normalize_key(name);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            sums.entry(key).or_insert_with(|| (name.clone(), 0.0)).1 += value;
        }
    }

    let mean = |sum: f64| if n == 0 { 0.0 } else { sum / n as f64 };

    let mut result: Vec<NutrientAverage> = references
        .iter()
        .map(|r| {
            let sum = sums.remove(r.key).map(|(_, s)| s).unwrap_or(0.0);
            NutrientAverage::from_rda(r, mean(sum))
        })
        .collect();

    result.extend(sums.into_iter().map(|(key, (name, sum))| NutrientAverage {
        key,
        name,
        average: mean(sum),
        unit: String::new(),
        recommended: None,
        percent_of_recommended: None,
    }));

    result
}

fn percent_of(value: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    (value / reference * 1000.0).round() / 10.0
}

/// Normalize a nutrient name to its lookup key
///
/// "Vitamin C", "vitamin_c" and "vitaminC" all become "c"; common chemical
/// names map to their B-vitamin number.
pub fn normalize_key(name: &str) -> String {
    let compact: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    let stripped = compact.strip_prefix("vitamin").unwrap_or(&compact);

    match stripped {
        "thiamin" | "thiamine" => "b1",
        "riboflavin" => "b2",
        "niacin" => "b3",
        "pyridoxine" => "b6",
        "folate" | "folicacid" => "b9",
        "cobalamin" => "b12",
        other => other,
    }
    .to_string()
}

/// Read a number from loosely-typed JSON
///
/// Accepts numbers and strings with a leading numeric part ("12.5g",
/// "~200 kcal"). Anything else, including negatives and NaN, yields 0.
pub fn lenient_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_leading_number(s),
        _ => 0.0,
    };

    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

fn parse_leading_number(s: &str) -> f64 {
    let start = match s.find(|c: char| c.is_ascii_digit() || c == '.') {
        Some(idx) => idx,
        None => return 0.0,
    };
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

/// Build a [`Nutrients`] value from loosely-typed JSON
///
/// Vitamins and minerals may be an object of `name -> amount` or an array of
/// `{ "name": ..., "amount" | "value": ... }` objects.
pub fn nutrients_from_value(value: Option<&Value>) -> Nutrients {
    let Some(Value::Object(obj)) = value else {
        return Nutrients::default();
    };

    Nutrients {
        vitamins: named_amounts(obj.get("vitamins")),
        minerals: named_amounts(obj.get("minerals")),
        fiber: lenient_f64(obj.get("fiber")),
        sugar: lenient_f64(obj.get("sugar")),
    }
}

fn named_amounts(value: Option<&Value>) -> BTreeMap<String, f64> {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, amount)| (name.clone(), lenient_f64(Some(amount))))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let name = item.get("name")?.as_str()?.to_string();
                let amount = lenient_f64(item.get("amount").or_else(|| item.get("value")));
                Some((name, amount))
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}
