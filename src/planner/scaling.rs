use tracing::{debug, warn};

use crate::models::{Macros, Meal, MealCategory, ScaledIngredient, ScaledMeal};
use crate::planner::constants::*;

/// Per-macro target/actual ratios.
///
/// A ratio is 1.0 whenever either side is not positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

fn ratio(target: f64, actual: f64) -> f64 {
    if target > 0.0 && actual > 0.0 {
        target / actual
    } else {
        1.0
    }
}

impl MacroRatios {
    pub fn between(meal: &Macros, target: &Macros) -> Self {
        Self {
            kcal: ratio(target.kcal, meal.kcal),
            protein: ratio(target.protein, meal.protein),
            carbs: ratio(target.carbs, meal.carbs),
            fat: ratio(target.fat, meal.fat),
        }
    }
}

/// Scale factor for `meal` against `target`, clamped to the global bound.
///
/// Protein-led weighting when both sides carry protein, calories alone
/// otherwise. `None` when the meal has no calories.
pub fn compute_scale(meal: &Meal, target: &Macros) -> Option<f64> {
    if !meal.is_scalable() {
        return None;
    }

    let ratios = MacroRatios::between(&meal.macros, target);
    let raw = if target.protein > 0.0 && meal.macros.protein > 0.0 {
        SCALE_WEIGHT_PROTEIN * ratios.protein
            + SCALE_WEIGHT_KCAL * ratios.kcal
            + SCALE_WEIGHT_CARBS * ratios.carbs
            + SCALE_WEIGHT_FAT * ratios.fat
    } else {
        ratios.kcal
    };

    Some(raw.clamp(GLOBAL_SCALE_MIN, GLOBAL_SCALE_MAX))
}

/// Multiply a meal's macros, ingredients and portion by `scale`.
pub fn apply_scale(meal: &Meal, scale: f64) -> ScaledMeal {
    let ingredients = meal
        .ingredients
        .iter()
        .map(|i| ScaledIngredient {
            name: i.name.clone(),
            amount: (i.amount * scale).round(),
            unit: i.unit.clone(),
            macros: i.macros.scaled(scale),
        })
        .collect();

    ScaledMeal {
        source: meal.clone(),
        meal_id: meal.id.clone(),
        meal_name: meal.name.clone(),
        scale,
        macros: meal.macros.scaled(scale),
        ingredients,
        portion_label: portion_label(scale),
        portion_size: meal.portion_size.map(|p| (p * scale).round()),
        recycled_from: None,
        fine_tuned: false,
    }
}

/// Portion one meal against one target.
///
/// With a `slot`, the factor is further clamped to that slot's bound. The
/// final factor is rounded to two decimals. Returns `None` (unfillable) for
/// meals without calories.
pub fn scale_meal(meal: &Meal, target: &Macros, slot: Option<MealCategory>) -> Option<ScaledMeal> {
    let Some(mut scale) = compute_scale(meal, target) else {
        warn!(meal = %meal.name, id = %meal.id, "Meal has no calories and cannot be scaled");
        return None;
    };

    if let Some(category) = slot {
        let (min, max) = slot_scale_bounds(category);
        scale = scale.clamp(min, max);
    }
    let scale = round_scale(scale);

    debug!(meal = %meal.name, scale, "Scaled meal");
    Some(apply_scale(meal, scale))
}

/// Portion a meal for a slot, or serve its base portion when scaling is off.
pub fn portion_for_slot(
    meal: &Meal,
    target: &Macros,
    slot: MealCategory,
    allow_scaling: bool,
) -> Option<ScaledMeal> {
    if allow_scaling {
        scale_meal(meal, target, Some(slot))
    } else if meal.is_scalable() {
        Some(apply_scale(meal, 1.0))
    } else {
        None
    }
}
