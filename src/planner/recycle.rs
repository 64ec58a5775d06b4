use tracing::debug;

use crate::models::{DayPlan, SlotKind};
use crate::planner::assembly::refresh_day;
use crate::planner::config::RecyclePattern;

/// Copy `slot` from `source_day` onto each of `target_days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecycleRule {
    pub slot: SlotKind,
    pub source_day: usize,
    pub target_days: Vec<usize>,
}

impl RecycleRule {
    fn new(slot: SlotKind, days: &[usize]) -> Self {
        Self {
            slot,
            source_day: days[0],
            target_days: days[1..].to_vec(),
        }
    }
}

impl RecyclePattern {
    /// Rules of this pattern; the first listed day of each rule is its source.
    pub fn rules(&self) -> Vec<RecycleRule> {
        match self {
            RecyclePattern::None => Vec::new(),
            RecyclePattern::Light => vec![RecycleRule::new(SlotKind::Lunch, &[0, 1, 3, 5])],
            RecyclePattern::Medium => vec![RecycleRule::new(SlotKind::Dinner, &[0, 2, 4])],
            RecyclePattern::Heavy => vec![RecycleRule::new(SlotKind::Lunch, &[0, 1, 2, 3, 4])],
            RecyclePattern::Mealprep => vec![
                RecycleRule::new(SlotKind::Lunch, &[0, 1, 2, 3, 4]),
                RecycleRule::new(SlotKind::Dinner, &[0, 2, 4]),
            ],
        }
    }
}

/// Overwrite slots with exact copies of earlier days' portions.
///
/// No re-scoring happens. A rule whose source slot is empty copies nothing.
/// Returns the number of slots overwritten.
pub fn apply_recycling(days: &mut [DayPlan], pattern: RecyclePattern) -> usize {
    let mut copied = 0;

    for rule in pattern.rules() {
        let Some(source) = days
            .get(rule.source_day)
            .and_then(|d| d.slot(rule.slot))
            .cloned()
        else {
            continue;
        };

        for &target in &rule.target_days {
            let Some(day) = days.get_mut(target) else {
                continue;
            };
            let mut copy = source.clone();
            copy.recycled_from = Some(rule.source_day);
            day.set_slot(rule.slot, Some(copy));
            refresh_day(day);
            copied += 1;
        }
    }

    if copied > 0 {
        debug!(pattern = %pattern, copied, "Applied recycling pattern");
    }

    copied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Meal};
    use crate::planner::scaling::apply_scale;

    fn week() -> Vec<DayPlan> {
        (0..7)
            .map(|i| {
                let mut day = DayPlan::empty(i, Macros::new(2000.0, 150.0, 200.0, 60.0), 0);
                let lunch = Meal::new(&format!("l{}", i), "Lunch", Macros::new(600.0, 40.0, 60.0, 20.0));
                let dinner = Meal::new(&format!("d{}", i), "Dinner", Macros::new(700.0, 50.0, 70.0, 25.0));
                day.set_slot(SlotKind::Lunch, Some(apply_scale(&lunch, 1.0 + i as f64 / 10.0)));
                day.set_slot(SlotKind::Dinner, Some(apply_scale(&dinner, 1.0)));
                refresh_day(&mut day);
                day
            })
            .collect()
    }

    #[test]
    fn test_none_pattern_is_noop() {
        let mut days = week();
        let before = days.clone();
        assert_eq!(apply_recycling(&mut days, RecyclePattern::None), 0);
        assert_eq!(days, before);
    }

    #[test]
    fn test_light_copies_day_zero_lunch() {
        let mut days = week();
        assert_eq!(apply_recycling(&mut days, RecyclePattern::Light), 3);

        let source = days[0].lunch.clone().unwrap();
        for i in [1, 3, 5] {
            let lunch = days[i].lunch.as_ref().unwrap();
            assert!(lunch.same_portion(&source));
            assert_eq!(lunch.recycled_from, Some(0));
            assert_eq!(days[i].totals.kcal, source.macros.kcal + 700.0);
        }
        assert_eq!(days[2].lunch.as_ref().unwrap().meal_id, "l2");
    }

    #[test]
    fn test_mealprep_copies_lunch_and_dinner() {
        let mut days = week();
        assert_eq!(apply_recycling(&mut days, RecyclePattern::Mealprep), 6);

        for i in 1..5 {
            assert_eq!(days[i].lunch.as_ref().unwrap().meal_id, "l0");
        }
        for i in [2, 4] {
            assert_eq!(days[i].dinner.as_ref().unwrap().meal_id, "d0");
        }
        assert_eq!(days[5].lunch.as_ref().unwrap().meal_id, "l5");
        assert_eq!(days[3].dinner.as_ref().unwrap().meal_id, "d3");
    }

    #[test]
    fn test_empty_source_copies_nothing() {
        let mut days = week();
        days[0].set_slot(SlotKind::Dinner, None);
        assert_eq!(apply_recycling(&mut days, RecyclePattern::Medium), 0);
        assert_eq!(days[2].dinner.as_ref().unwrap().meal_id, "d2");
    }

    #[test]
    fn test_medium_copies_day_zero_dinner() {
        let mut days = week();
        assert_eq!(apply_recycling(&mut days, RecyclePattern::Medium), 2);

        for i in [2, 4] {
            let dinner = days[i].dinner.as_ref().unwrap();
            assert_eq!(dinner.meal_id, "d0");
            assert_eq!(dinner.recycled_from, Some(0));
        }
        assert_eq!(days[1].dinner.as_ref().unwrap().meal_id, "d1");
        assert_eq!(days[2].lunch.as_ref().unwrap().meal_id, "l2");
    }

    #[test]
    fn test_heavy_copies_lunch_through_day_four() {
        let rules = RecyclePattern::Heavy.rules();
        assert_eq!(
            rules,
            vec![RecycleRule {
                slot: SlotKind::Lunch,
                source_day: 0,
                target_days: vec![1, 2, 3, 4],
            }]
        );

        let mut days = week();
        assert_eq!(apply_recycling(&mut days, RecyclePattern::Heavy), 4);
        let source = days[0].lunch.clone().unwrap();
        for i in 1..5 {
            assert!(days[i].lunch.as_ref().unwrap().same_portion(&source));
        }
        assert_eq!(days[5].lunch.as_ref().unwrap().meal_id, "l5");
        assert_eq!(days[4].dinner.as_ref().unwrap().meal_id, "d4");
    }
}
