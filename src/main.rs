use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meal_plan_maker_rs::cli::{Cli, Command, PlanArgs};
use meal_plan_maker_rs::error::{PlanError, Result};
use meal_plan_maker_rs::interface::{
    display_classification, display_week_plan, prompt_daily_targets, prompt_forced_meals,
    prompt_recycle_pattern, prompt_strategy, prompt_yes_no,
};
use meal_plan_maker_rs::library::{
    export_week_csv, load_config, load_meals, save_week_plan, MealLibrary,
};
use meal_plan_maker_rs::planner::{generate_week_plan, resolve_category, PlannerConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("meal_plan_maker_rs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading planner config");
            load_config(path)?
        }
        None => PlannerConfig::default(),
    };

    if !cli.meals.exists() {
        eprintln!("Meal library not found: {}", cli.meals.display());
        eprintln!("Pass --meals <file> with a JSON array of meals.");
        return Ok(());
    }

    let library = MealLibrary::new(load_meals(&cli.meals)?);
    if library.is_empty() {
        return Err(PlanError::NoMeals);
    }

    for meal in library.invalid_meals() {
        warn!(meal = %meal.debug_string(), "Meal has negative values");
    }
    for meal in library.unscalable_meals() {
        warn!(meal = %meal.name, "Meal has no calories and will never be selected");
    }

    match command {
        Command::Plan(args) => cmd_plan(&library, config, args),
        Command::Classify => cmd_classify(&library, &config),
    }
}

/// Generate and display a week plan.
fn cmd_plan(library: &MealLibrary, mut config: PlannerConfig, args: PlanArgs) -> Result<()> {
    println!("Loaded {} meals", library.len());

    let targets = prompt_daily_targets(
        args.kcal,
        args.protein,
        args.carbs,
        args.fat,
        args.meals_per_day,
    )?;

    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    } else if args.interactive {
        config.strategy = prompt_strategy()?;
    }

    if let Some(recycle) = args.recycle {
        config.recycle = recycle;
    } else if args.interactive {
        config.recycle = prompt_recycle_pattern()?;
    }

    if let Some(min_accuracy) = args.min_accuracy {
        config.min_accuracy = min_accuracy;
    }
    if args.no_scaling {
        config.allow_scaling = false;
    }
    if args.no_fine_tune {
        config.fine_tune = false;
    }

    let mut forced = library.resolve_all(&args.force)?;
    if args.interactive {
        forced.extend(prompt_forced_meals(library)?);
    }
    if !forced.is_empty() {
        println!(
            "Forced meals: {}",
            forced.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    println!(
        "Planning {} meals/day at {}...",
        targets.meals_per_day, targets.macros
    );

    let plan = generate_week_plan(library.meals(), &forced, &targets, &config)?;

    display_week_plan(&plan, &config);

    if let Some(path) = &args.out {
        save_week_plan(path, &plan)?;
        println!("Plan saved to {}", path.display());
    } else if args.interactive && prompt_yes_no("Save plan as week_plan.json?", false)? {
        save_week_plan("week_plan.json", &plan)?;
        println!("Plan saved to week_plan.json");
    }

    if let Some(path) = &args.csv {
        export_week_csv(path, &plan)?;
        println!("Plan exported to {}", path.display());
    }

    Ok(())
}

/// List every library meal with its resolved category.
fn cmd_classify(library: &MealLibrary, config: &PlannerConfig) -> Result<()> {
    let classifier = config.classifier();

    let rows: Vec<_> = library
        .meals()
        .iter()
        .map(|m| (m, resolve_category(m, &classifier, config.infer_categories)))
        .collect();

    display_classification(&rows);
    Ok(())
}
