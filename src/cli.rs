use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::planner::{RecyclePattern, SelectionStrategy};

/// MealPlanMaker: builds weekly meal plans that hit a client's macro targets.
#[derive(Parser, Debug)]
#[command(name = "meal_plan_maker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal library JSON file.
    #[arg(short, long, default_value = "meals.json")]
    pub meals: PathBuf,

    /// Path to a planner config JSON file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a seven-day plan for one client.
    Plan(PlanArgs),

    /// Show the category every library meal resolves to.
    Classify,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Daily calorie target (prompted when missing).
    #[arg(long)]
    pub kcal: Option<f64>,

    /// Daily protein target in grams.
    #[arg(long)]
    pub protein: Option<f64>,

    /// Daily carbohydrate target in grams.
    #[arg(long)]
    pub carbs: Option<f64>,

    /// Daily fat target in grams.
    #[arg(long)]
    pub fat: Option<f64>,

    /// Meals per day (3 to 6).
    #[arg(long)]
    pub meals_per_day: Option<u8>,

    /// protein-priority, balanced or calorie-match.
    #[arg(long)]
    pub strategy: Option<SelectionStrategy>,

    /// none, light, medium, heavy or mealprep.
    #[arg(long)]
    pub recycle: Option<RecyclePattern>,

    /// Days below this weighted accuracy are fine-tuned.
    #[arg(long)]
    pub min_accuracy: Option<f64>,

    /// Serve every meal at its base portion.
    #[arg(long)]
    pub no_scaling: bool,

    /// Skip the fine-tuning pass.
    #[arg(long)]
    pub no_fine_tune: bool,

    /// Meal (id or name) the plan must include. Repeatable.
    #[arg(long = "force")]
    pub force: Vec<String>,

    /// Prompt for strategy, recycling and forced meals.
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the plan as JSON.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write the plan as CSV rows (one per filled slot).
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
