pub mod assembly;
pub mod classify;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod finetune;
pub mod recycle;
pub mod scaling;
pub mod selection;
pub mod stats;
pub mod week;

pub use assembly::{calculate_accuracy, calculate_day_totals, generate_day_plan, refresh_day};
pub use classify::{
    classify_by_calories, resolve_category, CategorySource, KeywordClassifier, KeywordRule,
    MealClassifier, MealPools,
};
pub use config::{PlannerConfig, RecyclePattern, ScoringWeights, SelectionStrategy};
pub use constants::*;
pub use distribution::distribute_targets;
pub use finetune::{fine_tune_day, fine_tune_week, FineTuneConfig};
pub use recycle::{apply_recycling, RecycleRule};
pub use scaling::{apply_scale, compute_scale, portion_for_slot, scale_meal};
pub use selection::{score_portion, select_meal};
pub use stats::calculate_week_stats;
pub use week::{build_pools, generate_week_plan};
