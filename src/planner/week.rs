use tracing::info;

use crate::error::Result;
use crate::models::{DailyTargets, DayPlan, Meal, WeekPlan};
use crate::planner::assembly::generate_day_plan;
use crate::planner::classify::MealPools;
use crate::planner::config::PlannerConfig;
use crate::planner::constants::DAYS_PER_WEEK;
use crate::planner::distribution::distribute_targets;
use crate::planner::finetune::{fine_tune_week, FineTuneConfig};
use crate::planner::recycle::apply_recycling;
use crate::planner::stats::calculate_week_stats;

/// Build the pools for one run from the library, forced meals and config.
pub fn build_pools(meals: &[Meal], forced: &[Meal], config: &PlannerConfig) -> MealPools {
    MealPools::build(meals, forced, &config.classifier(), config.infer_categories)
}

/// Generate a seven-day plan.
///
/// Pure and deterministic: identical inputs give identical plans. Only
/// invalid targets produce an error; empty pools yield empty days.
pub fn generate_week_plan(
    meals: &[Meal],
    forced: &[Meal],
    targets: &DailyTargets,
    config: &PlannerConfig,
) -> Result<WeekPlan> {
    let slots = distribute_targets(targets)?;
    let pools = build_pools(meals, forced, config);

    let mut days: Vec<DayPlan> = (0..DAYS_PER_WEEK)
        .map(|day_index| generate_day_plan(&pools, &slots, &targets.macros, day_index, config))
        .collect();

    let recycled = apply_recycling(&mut days, config.recycle);

    let tuned = if config.fine_tune {
        let tune_config = FineTuneConfig {
            min_accuracy: config.min_accuracy,
            protein_gap_threshold: config.protein_gap_threshold,
        };
        fine_tune_week(&mut days, &tune_config)
    } else {
        0
    };

    let stats = calculate_week_stats(&days);
    let plan = WeekPlan { days, stats };

    info!(
        meals = meals.len(),
        forced = forced.len(),
        strategy = %config.strategy,
        recycle = %config.recycle,
        recycled,
        fine_tuned = tuned,
        variety = plan.stats.variety,
        compliance = plan.stats.compliance_score,
        "Generated week plan (avg accuracy {:.1}%)",
        plan.average_accuracy()
    );

    Ok(plan)
}
