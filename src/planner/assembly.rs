use crate::models::{Accuracy, DayPlan, Macros, SlotKind, SlotTargets};
use crate::planner::classify::MealPools;
use crate::planner::config::PlannerConfig;
use crate::planner::constants::*;
use crate::planner::selection::select_meal;

/// Sum the macros of every filled slot; unfilled slots contribute nothing.
pub fn calculate_day_totals(day: &DayPlan) -> Macros {
    day.filled_slots()
        .into_iter()
        .fold(Macros::default(), |acc, (_, meal)| acc + meal.macros)
}

/// Closeness of one achieved value to its target, in percent (0 to 100).
///
/// A macro without a target is untracked and counts as fully met.
pub fn macro_accuracy(achieved: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (100.0 - (achieved - target).abs() / target * 100.0).max(0.0)
}

/// Per-macro and weighted accuracy of `achieved` against `target`.
pub fn calculate_accuracy(achieved: &Macros, target: &Macros) -> Accuracy {
    let kcal = macro_accuracy(achieved.kcal, target.kcal);
    let protein = macro_accuracy(achieved.protein, target.protein);
    let carbs = macro_accuracy(achieved.carbs, target.carbs);
    let fat = macro_accuracy(achieved.fat, target.fat);

    Accuracy {
        kcal,
        protein,
        carbs,
        fat,
        total: ACCURACY_WEIGHT_PROTEIN * protein
            + ACCURACY_WEIGHT_KCAL * kcal
            + ACCURACY_WEIGHT_CARBS * carbs
            + ACCURACY_WEIGHT_FAT * fat,
    }
}

/// Recompute a day's totals and accuracy after its slots changed.
pub fn refresh_day(day: &mut DayPlan) {
    day.totals = calculate_day_totals(day);
    day.accuracy = calculate_accuracy(&day.totals, &day.targets);
}

/// Fill every slot of one day and score the result.
///
/// `daily` is the undistributed daily target that accuracy is measured against.
pub fn generate_day_plan(
    pools: &MealPools,
    slots: &SlotTargets,
    daily: &Macros,
    day_index: usize,
    config: &PlannerConfig,
) -> DayPlan {
    let mut day = DayPlan::empty(day_index, *daily, slots.snacks.len());

    let fixed = [
        (SlotKind::Breakfast, &slots.breakfast),
        (SlotKind::Lunch, &slots.lunch),
        (SlotKind::Dinner, &slots.dinner),
    ];
    let snacks = slots
        .snacks
        .iter()
        .enumerate()
        .map(|(i, target)| (SlotKind::Snack(i), target));

    for (kind, target) in fixed.into_iter().chain(snacks) {
        let meal = select_meal(pools, kind.category(), target, day_index, config);
        day.set_slot(kind, meal);
    }

    refresh_day(&mut day);
    day
}
