use std::fmt;

use serde::Serialize;

use crate::models::{Macros, Meal, MealCategory};

/// An ingredient line after portion scaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub macros: Macros,
}

/// A library meal portioned for one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledMeal {
    /// Unscaled source record, kept so the meal can be re-portioned later.
    #[serde(skip)]
    pub source: Meal,

    pub meal_id: String,

    pub meal_name: String,

    /// Multiplier applied to the base recipe.
    pub scale: f64,

    pub macros: Macros,

    pub ingredients: Vec<ScaledIngredient>,

    pub portion_label: &'static str,

    pub portion_size: Option<f64>,

    /// Day index this meal was copied from by a recycling rule.
    pub recycled_from: Option<usize>,

    /// Whether the fine-tuning pass re-portioned this meal.
    pub fine_tuned: bool,
}

impl ScaledMeal {
    /// Same source meal at the same scale.
    pub fn same_portion(&self, other: &ScaledMeal) -> bool {
        self.meal_id == other.meal_id && self.scale == other.scale
    }
}

/// Addresses one slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlotKind {
    Breakfast,
    Lunch,
    Dinner,
    Snack(usize),
}

impl SlotKind {
    /// Category used for pool lookup and slot-specific scale bounds.
    pub fn category(&self) -> MealCategory {
        match self {
            SlotKind::Breakfast => MealCategory::Breakfast,
            SlotKind::Lunch => MealCategory::Lunch,
            SlotKind::Dinner => MealCategory::Dinner,
            SlotKind::Snack(_) => MealCategory::Snack,
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Snack(i) => write!(f, "snack {}", i + 1),
            other => f.write_str(other.category().as_str()),
        }
    }
}

/// Percentage closeness of achieved macros to targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Accuracy {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,

    /// Weighted combination of the four macro accuracies.
    pub total: f64,
}

/// One generated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day_index: usize,

    pub breakfast: Option<ScaledMeal>,
    pub lunch: Option<ScaledMeal>,
    pub dinner: Option<ScaledMeal>,

    /// Positional snack slots; `None` marks an unfilled slot.
    pub snacks: Vec<Option<ScaledMeal>>,

    pub targets: Macros,
    pub totals: Macros,
    pub accuracy: Accuracy,
}

impl DayPlan {
    /// An empty day with `snack_slots` unfilled snack positions.
    pub fn empty(day_index: usize, targets: Macros, snack_slots: usize) -> Self {
        Self {
            day_index,
            breakfast: None,
            lunch: None,
            dinner: None,
            snacks: vec![None; snack_slots],
            targets,
            totals: Macros::default(),
            accuracy: Accuracy::default(),
        }
    }

    pub fn slot(&self, kind: SlotKind) -> Option<&ScaledMeal> {
        match kind {
            SlotKind::Breakfast => self.breakfast.as_ref(),
            SlotKind::Lunch => self.lunch.as_ref(),
            SlotKind::Dinner => self.dinner.as_ref(),
            SlotKind::Snack(i) => self.snacks.get(i).and_then(Option::as_ref),
        }
    }

    /// Place `meal` into a slot. Snack positions beyond the current length are ignored.
    pub fn set_slot(&mut self, kind: SlotKind, meal: Option<ScaledMeal>) {
        match kind {
            SlotKind::Breakfast => self.breakfast = meal,
            SlotKind::Lunch => self.lunch = meal,
            SlotKind::Dinner => self.dinner = meal,
            SlotKind::Snack(i) => {
                if let Some(slot) = self.snacks.get_mut(i) {
                    *slot = meal;
                }
            }
        }
    }

    /// All slot positions of this day in serving order.
    pub fn slot_kinds(&self) -> Vec<SlotKind> {
        let mut kinds = vec![SlotKind::Breakfast, SlotKind::Lunch, SlotKind::Dinner];
        kinds.extend((0..self.snacks.len()).map(SlotKind::Snack));
        kinds
    }

    /// Filled slots in serving order.
    pub fn filled_slots(&self) -> Vec<(SlotKind, &ScaledMeal)> {
        self.slot_kinds()
            .into_iter()
            .filter_map(|kind| self.slot(kind).map(|meal| (kind, meal)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_slots().is_empty()
    }
}

/// Weekly aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekStats {
    pub average: Macros,
    pub variety: usize,
    pub recycled_meals: usize,
    pub compliance_score: f64,
}

/// Seven generated days plus their stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekPlan {
    pub days: Vec<DayPlan>,
    pub stats: WeekStats,
}

impl WeekPlan {
    /// Average weighted accuracy across the week.
    pub fn average_accuracy(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.days.iter().map(|d| d.accuracy.total).sum::<f64>() / self.days.len() as f64
    }
}
