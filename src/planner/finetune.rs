use tracing::info;

use crate::models::{DayPlan, SlotKind};
use crate::planner::assembly::refresh_day;
use crate::planner::constants::*;
use crate::planner::scaling::apply_scale;

/// Knobs of the corrective pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FineTuneConfig {
    pub min_accuracy: f64,
    pub protein_gap_threshold: f64,
}

impl Default for FineTuneConfig {
    fn default() -> Self {
        Self {
            min_accuracy: DEFAULT_MIN_ACCURACY,
            protein_gap_threshold: PROTEIN_GAP_THRESHOLD,
        }
    }
}

/// Filled slot contributing the most protein. Earlier slots win ties.
fn top_protein_slot(day: &DayPlan) -> Option<SlotKind> {
    day.filled_slots()
        .into_iter()
        .fold(None, |best: Option<(SlotKind, f64)>, (kind, meal)| match best {
            Some((_, protein)) if protein >= meal.macros.protein => best,
            _ => Some((kind, meal.macros.protein)),
        })
        .map(|(kind, _)| kind)
}

/// Re-portion the protein-dominant meal of one day if it falls short.
///
/// A single damped correction on protein only; the other macros are not
/// re-balanced afterwards. Returns whether the day changed.
pub fn fine_tune_day(day: &mut DayPlan, config: &FineTuneConfig) -> bool {
    if day.accuracy.total >= config.min_accuracy {
        return false;
    }

    let protein_gap = day.targets.protein - day.totals.protein;
    if protein_gap <= config.protein_gap_threshold {
        return false;
    }

    let Some(kind) = top_protein_slot(day) else {
        return false;
    };
    let Some(meal) = day.slot(kind) else {
        return false;
    };
    if meal.macros.protein <= 0.0 {
        return false;
    }

    let multiplier = 1.0 + (protein_gap / meal.macros.protein) * FINE_TUNE_DAMPING;
    let new_scale =
        round_scale((meal.scale * multiplier).clamp(FINE_TUNE_SCALE_MIN, FINE_TUNE_SCALE_MAX));
    if new_scale == meal.scale {
        return false;
    }

    let mut adjusted = apply_scale(&meal.source, new_scale);
    adjusted.recycled_from = meal.recycled_from;
    adjusted.fine_tuned = true;

    let before = day.accuracy.total;
    info!(
        day = day.day_index,
        slot = %kind,
        meal = %adjusted.meal_name,
        old_scale = meal.scale,
        new_scale,
        protein_gap,
        "Fine-tuned portion"
    );

    day.set_slot(kind, Some(adjusted));
    refresh_day(day);

    info!(
        day = day.day_index,
        "Day accuracy {:.1} -> {:.1} after fine-tuning",
        before,
        day.accuracy.total
    );
    true
}

/// Single corrective pass over every day below the accuracy threshold.
///
/// Returns the number of days adjusted.
pub fn fine_tune_week(days: &mut [DayPlan], config: &FineTuneConfig) -> usize {
    days.iter_mut()
        .map(|day| fine_tune_day(day, config))
        .filter(|changed| *changed)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Meal};

    fn low_protein_day() -> DayPlan {
        let mut day = DayPlan::empty(0, Macros::new(2000.0, 150.0, 200.0, 60.0), 0);
        let chicken = Meal::new("c", "Chicken Rice", Macros::new(600.0, 50.0, 60.0, 15.0));
        let pasta = Meal::new("p", "Pasta", Macros::new(700.0, 20.0, 110.0, 20.0));
        day.set_slot(SlotKind::Lunch, Some(apply_scale(&chicken, 1.0)));
        day.set_slot(SlotKind::Dinner, Some(apply_scale(&pasta, 1.0)));
        refresh_day(&mut day);
        day
    }

    #[test]
    fn test_protein_dominant_meal_rescaled() {
        let mut day = low_protein_day();
        assert!(day.accuracy.total < DEFAULT_MIN_ACCURACY);
        let protein_before = day.totals.protein;

        assert!(fine_tune_day(&mut day, &FineTuneConfig::default()));

        // gap 80g, meal protein 50g: 1 + 80/50 * 0.5 = 1.8
        let lunch = day.lunch.as_ref().unwrap();
        assert_eq!(lunch.scale, 1.8);
        assert!(lunch.fine_tuned);
        assert_eq!(lunch.macros.protein, 90.0);
        assert!(day.totals.protein > protein_before);
        assert!(!day.dinner.as_ref().unwrap().fine_tuned);
    }

    #[test]
    fn test_scale_capped() {
        let mut day = DayPlan::empty(0, Macros::new(2000.0, 200.0, 200.0, 60.0), 0);
        let eggs = Meal::new("e", "Eggs", Macros::new(200.0, 12.0, 2.0, 14.0));
        day.set_slot(SlotKind::Breakfast, Some(apply_scale(&eggs, 1.0)));
        refresh_day(&mut day);

        assert!(fine_tune_day(&mut day, &FineTuneConfig::default()));
        assert_eq!(day.breakfast.as_ref().unwrap().scale, FINE_TUNE_SCALE_MAX);
    }

    #[test]
    fn test_accurate_day_untouched() {
        let mut day = low_protein_day();
        let config = FineTuneConfig {
            min_accuracy: 10.0,
            ..Default::default()
        };
        assert!(!fine_tune_day(&mut day, &config));
    }

    #[test]
    fn test_small_protein_gap_untouched() {
        let mut day = low_protein_day();
        day.targets.protein = 75.0;
        refresh_day(&mut day);
        day.accuracy.total = 0.0;
        assert!(!fine_tune_day(&mut day, &FineTuneConfig::default()));
    }

    #[test]
    fn test_empty_day_untouched() {
        let mut days = vec![DayPlan::empty(0, Macros::new(2000.0, 150.0, 200.0, 60.0), 2)];
        assert_eq!(fine_tune_week(&mut days, &FineTuneConfig::default()), 0);
    }
}
