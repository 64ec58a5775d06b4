pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_daily_targets, prompt_forced_meals, prompt_meals_per_day, prompt_recycle_pattern,
    prompt_strategy, prompt_yes_no,
};
pub use render::{display_classification, display_day, display_week_plan};
