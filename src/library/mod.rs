mod manager;
mod persistence;

pub use manager::{MealLibrary, FUZZY_MATCH_THRESHOLD};
pub use persistence::{export_week_csv, load_config, load_meals, save_week_plan, WEEKDAYS};
