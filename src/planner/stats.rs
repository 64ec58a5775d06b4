use std::collections::HashSet;

use crate::models::{DayPlan, Macros, SlotKind, WeekStats};
use crate::planner::constants::*;

/// Slots re-used across the week for one slot kind: filled slots minus distinct meals.
fn repeats(days: &[DayPlan], kind: SlotKind) -> usize {
    let ids: Vec<&str> = days
        .iter()
        .filter_map(|d| d.slot(kind).map(|m| m.meal_id.as_str()))
        .collect();
    let distinct: HashSet<&str> = ids.iter().copied().collect();
    ids.len() - distinct.len()
}

/// Compliance penalty for one day.
fn day_penalty(day: &DayPlan) -> f64 {
    let protein: f64 = PROTEIN_COMPLIANCE_PENALTIES
        .iter()
        .filter(|(threshold, _)| day.accuracy.protein < *threshold)
        .map(|(_, penalty)| penalty)
        .sum();
    let kcal: f64 = KCAL_COMPLIANCE_PENALTIES
        .iter()
        .filter(|(threshold, _)| day.accuracy.kcal < *threshold)
        .map(|(_, penalty)| penalty)
        .sum();
    protein + kcal
}

/// Weekly averages, variety, recycled-meal count and compliance score.
pub fn calculate_week_stats(days: &[DayPlan]) -> WeekStats {
    let sum = days
        .iter()
        .fold(Macros::default(), |acc, d| acc + d.totals);
    let average = sum.map(|v| v / DAYS_PER_WEEK as f64);

    let variety = days
        .iter()
        .flat_map(|d| d.filled_slots())
        .map(|(_, meal)| meal.meal_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let recycled_meals = repeats(days, SlotKind::Lunch) + repeats(days, SlotKind::Dinner);

    let penalty: f64 = days.iter().map(day_penalty).sum();
    let compliance_score = (COMPLIANCE_START - penalty).max(0.0);

    WeekStats {
        average,
        variety,
        recycled_meals,
        compliance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accuracy, Meal};
    use crate::planner::scaling::apply_scale;

    fn day(i: usize, lunch_id: &str, dinner_id: &str, accuracy: Accuracy) -> DayPlan {
        let mut d = DayPlan::empty(i, Macros::new(2000.0, 150.0, 200.0, 60.0), 0);
        let lunch = Meal::new(lunch_id, lunch_id, Macros::new(700.0, 60.0, 70.0, 20.0));
        let dinner = Meal::new(dinner_id, dinner_id, Macros::new(700.0, 40.0, 80.0, 25.0));
        d.set_slot(SlotKind::Lunch, Some(apply_scale(&lunch, 1.0)));
        d.set_slot(SlotKind::Dinner, Some(apply_scale(&dinner, 1.0)));
        d.totals = Macros::new(1400.0, 100.0, 150.0, 45.0);
        d.accuracy = accuracy;
        d
    }

    fn perfect() -> Accuracy {
        Accuracy {
            kcal: 100.0,
            protein: 100.0,
            carbs: 100.0,
            fat: 100.0,
            total: 100.0,
        }
    }

    #[test]
    fn test_variety_and_recycled_count() {
        let days: Vec<DayPlan> = (0..7)
            .map(|i| {
                let lunch = if i < 5 { "L".to_string() } else { format!("L{}", i) };
                day(i, &lunch, &format!("D{}", i % 4), perfect())
            })
            .collect();

        let stats = calculate_week_stats(&days);
        // lunches: L x5, L5, L6 -> 3 distinct; dinners D0..D3 -> 4 distinct
        assert_eq!(stats.recycled_meals, (7 - 3) + (7 - 4));
        assert_eq!(stats.variety, 7);
        assert_eq!(stats.average.kcal, 1400.0);
        assert_eq!(stats.compliance_score, 100.0);
    }

    #[test]
    fn test_compliance_penalties_stack() {
        let poor = Accuracy {
            kcal: 85.0,
            protein: 75.0,
            ..perfect()
        };
        let days: Vec<DayPlan> = (0..7)
            .map(|i| day(i, &format!("L{}", i), &format!("D{}", i), if i == 0 { poor } else { perfect() }))
            .collect();

        // protein < 90 and < 80 -> 15, kcal < 90 -> 3
        assert_eq!(calculate_week_stats(&days).compliance_score, 82.0);
    }

    #[test]
    fn test_compliance_floors_at_zero() {
        let awful = Accuracy::default();
        let days: Vec<DayPlan> = (0..7)
            .map(|i| day(i, &format!("L{}", i), &format!("D{}", i), awful))
            .collect();
        // 7 * (15 + 10) = 175 penalty
        assert_eq!(calculate_week_stats(&days).compliance_score, 0.0);
    }

    #[test]
    fn test_empty_days_have_no_recycling() {
        let days: Vec<DayPlan> = (0..7)
            .map(|i| DayPlan::empty(i, Macros::new(2000.0, 150.0, 200.0, 60.0), 1))
            .collect();
        let stats = calculate_week_stats(&days);
        assert_eq!(stats.variety, 0);
        assert_eq!(stats.recycled_meals, 0);
        assert_eq!(stats.average, Macros::default());
    }
}
