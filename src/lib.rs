pub mod cli;
pub mod error;
pub mod interface;
pub mod library;
pub mod models;
pub mod planner;
pub mod tuner;

pub use error::{PlanError, Result};
pub use models::{DailyTargets, DayPlan, Macros, Meal, MealCategory, ScaledMeal, WeekPlan};
pub use planner::{generate_week_plan, PlannerConfig};
