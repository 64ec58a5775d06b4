use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Deserializer, Serialize};

/// The four tracked nutritional quantities.
///
/// Missing or `null` fields deserialize to 0 so downstream arithmetic never
/// has to special-case absent data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub kcal: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub protein: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub carbs: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub fat: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Macros {
    pub fn new(kcal: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            kcal,
            protein,
            carbs,
            fat,
        }
    }

    /// Multiply every field by `factor`, rounding each to the nearest whole unit.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            kcal: (self.kcal * factor).round(),
            protein: (self.protein * factor).round(),
            carbs: (self.carbs * factor).round(),
            fat: (self.fat * factor).round(),
        }
    }

    /// Apply `f` to every field.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            kcal: f(self.kcal),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
        }
    }

    pub fn is_non_negative(&self) -> bool {
        [self.kcal, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            kcal: self.kcal + rhs.kcal,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal, P:{:.0} C:{:.0} F:{:.0}",
            self.kcal, self.protein, self.carbs, self.fat
        )
    }
}

/// Canonical meal-time categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snack,
    ];

    /// Parse a canonical category name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealCategory::Breakfast),
            "lunch" => Some(MealCategory::Lunch),
            "dinner" => Some(MealCategory::Dinner),
            "snack" => Some(MealCategory::Snack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Snack => "snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a meal's ingredient list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub unit: String,

    /// Macros for `amount` of this ingredient.
    #[serde(flatten)]
    pub macros: Macros,
}

/// A library meal as supplied by the meal store.
///
/// Read-only to the planner: every plan works on scaled copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(flatten)]
    pub macros: Macros,

    /// Base portion size (grams or the meal's own unit).
    #[serde(default)]
    pub portion_size: Option<f64>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Meal {
    pub fn new(id: &str, name: &str, macros: Macros) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            macros,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// A meal without calories cannot be portioned.
    #[inline]
    pub fn is_scalable(&self) -> bool {
        self.macros.kcal > 0.0
    }

    /// Explicit category string, if one is set and non-blank.
    pub fn explicit_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Basic validation: non-negative macros everywhere.
    pub fn is_valid(&self) -> bool {
        self.macros.is_non_negative()
            && self.ingredients.iter().all(|i| i.macros.is_non_negative() && i.amount >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!("{} ({}): {}", self.name, self.id, self.macros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_macros_default_to_zero() {
        let json = r#"{"id": "m1", "name": "Mystery", "kcal": null, "protein": 12}"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.macros.kcal, 0.0);
        assert_eq!(meal.macros.protein, 12.0);
        assert_eq!(meal.macros.carbs, 0.0);
        assert!(!meal.is_scalable());
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn test_ingredient_macros_flattened() {
        let json = r#"{
            "id": "m2", "name": "Oats", "kcal": 380, "protein": 13, "carbs": 60, "fat": 7,
            "ingredients": [{"name": "Oat flakes", "amount": 80, "unit": "g", "kcal": 300}]
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.ingredients.len(), 1);
        assert_eq!(meal.ingredients[0].macros.kcal, 300.0);
        assert_eq!(meal.ingredients[0].macros.fat, 0.0);
    }

    #[test]
    fn test_scaled_rounds_each_field() {
        let macros = Macros::new(333.0, 25.0, 41.0, 9.0);
        let scaled = macros.scaled(1.5);
        assert_eq!(scaled, Macros::new(500.0, 38.0, 62.0, 14.0));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(MealCategory::parse(" Lunch "), Some(MealCategory::Lunch));
        assert_eq!(MealCategory::parse("dessert"), None);
    }

    #[test]
    fn test_explicit_category_ignores_blank() {
        let meal = Meal::new("m3", "Toast", Macros::default()).with_category("  ");
        assert!(meal.explicit_category().is_none());
    }
}
