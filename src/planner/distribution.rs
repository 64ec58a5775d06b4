use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{DailyTargets, Macros, SlotTargets};
use crate::planner::constants::slot_percentages;

/// Split daily targets into per-slot targets.
///
/// Each slot gets `round(daily * pct / 100)` per macro. The snack aggregate is
/// divided evenly across the snack slots with each share rounded on its own,
/// so slot targets may drift from the daily figure by a few units.
pub fn distribute_targets(targets: &DailyTargets) -> Result<SlotTargets> {
    targets.validate()?;

    let [breakfast_pct, lunch_pct, dinner_pct, snack_pct] =
        slot_percentages(targets.meals_per_day).ok_or_else(|| {
            PlanError::InvalidTargets(format!(
                "no slot distribution for {} meals per day",
                targets.meals_per_day
            ))
        })?;

    let share = |pct: f64| targets.macros.map(|v| (v * pct / 100.0).round());

    let snack_total = share(snack_pct);
    let snack_count = targets.snack_count();
    let snacks: Vec<Macros> = if snack_count == 0 {
        Vec::new()
    } else {
        let per_snack = snack_total.map(|v| (v / snack_count as f64).round());
        vec![per_snack; snack_count]
    };

    let slots = SlotTargets {
        breakfast: share(breakfast_pct),
        lunch: share(lunch_pct),
        dinner: share(dinner_pct),
        snack_total,
        snacks,
    };

    debug!(
        meals_per_day = targets.meals_per_day,
        breakfast = %slots.breakfast,
        lunch = %slots.lunch,
        dinner = %slots.dinner,
        snack_total = %slots.snack_total,
        "Distributed daily targets"
    );

    Ok(slots)
}
