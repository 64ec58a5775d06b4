pub mod meal;
pub mod plan;
pub mod targets;

pub use meal::{Ingredient, Macros, Meal, MealCategory};
pub use plan::{Accuracy, DayPlan, ScaledIngredient, ScaledMeal, SlotKind, WeekPlan, WeekStats};
pub use targets::{DailyTargets, SlotTargets};
