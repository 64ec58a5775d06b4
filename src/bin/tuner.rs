use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meal_plan_maker_rs::library::{load_config, load_meals};
use meal_plan_maker_rs::models::DailyTargets;
use meal_plan_maker_rs::planner::PlannerConfig;
use meal_plan_maker_rs::tuner::{
    default_profiles, print_topk, run_tuner, write_best_json, write_csv, KnobRanges, TunerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Selection-weight tuner for the meal plan generator")]
struct Args {
    /// Number of random search iterations
    #[arg(long, default_value = "300")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Client profiles as kcal:protein:carbs:fat:meals, comma-separated
    #[arg(long)]
    profiles: Option<String>,

    /// Path to the meal library JSON
    #[arg(long, default_value = "meals.json")]
    meals: PathBuf,

    /// Planner config shared by every candidate
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV file for all results
    #[arg(long, default_value = "tuner_results.csv")]
    csv: PathBuf,

    /// Output JSON file for best result
    #[arg(long, default_value = "tuner_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,
}

/// Parse `2000:150:200:67:4,1800:140:170:60:3` into targets, skipping malformed entries.
fn parse_profiles(s: &str) -> Vec<DailyTargets> {
    s.split(',')
        .filter_map(|part| {
            let fields: Vec<&str> = part.trim().split(':').collect();
            if fields.len() != 5 {
                return None;
            }
            let kcal = fields[0].parse().ok()?;
            let protein = fields[1].parse().ok()?;
            let carbs = fields[2].parse().ok()?;
            let fat = fields[3].parse().ok()?;
            let meals = fields[4].parse().ok()?;
            Some(DailyTargets::new(kcal, protein, carbs, fat, meals))
        })
        .filter(|targets| targets.validate().is_ok())
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let meals = match load_meals(&args.meals) {
        Ok(meals) => meals,
        Err(e) => {
            eprintln!("Error loading meals {:?}: {}", args.meals, e);
            std::process::exit(1);
        }
    };

    if meals.is_empty() {
        eprintln!("Error: meal library is empty");
        std::process::exit(1);
    }
    println!("Loaded {} meals from {:?}", meals.len(), args.meals);

    let base = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => PlannerConfig::default(),
    };

    let profiles = match &args.profiles {
        Some(list) => parse_profiles(list),
        None => default_profiles(),
    };
    if profiles.is_empty() {
        eprintln!("Error: no valid profiles provided");
        std::process::exit(1);
    }
    println!("Testing {} client profiles", profiles.len());

    let config = TunerConfig {
        iterations: args.iters,
        seed: args.seed,
        profiles,
        ranges: KnobRanges::default(),
        base,
    };

    let tuner_results = run_tuner(config, &meals);

    print_topk(&tuner_results.results, args.topk);

    let best = tuner_results.best();
    let baseline = &tuner_results.baseline;

    println!("=== Comparison: Best vs Baseline ===");
    println!(
        "Baseline: accuracy={:.2} compliance={:.1} variety={:.1}",
        baseline.avg_accuracy, baseline.avg_compliance, baseline.avg_variety
    );
    println!(
        "Best:     accuracy={:.2} compliance={:.1} variety={:.1}",
        best.avg_accuracy, best.avg_compliance, best.avg_variety
    );
    println!(
        "Change:   accuracy {:+.2}  compliance {:+.1}  variety {:+.1}",
        best.avg_accuracy - baseline.avg_accuracy,
        best.avg_compliance - baseline.avg_compliance,
        best.avg_variety - baseline.avg_variety
    );
    println!();

    if let Err(e) = write_csv(&tuner_results.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_best_json(best, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote best result to {:?}", args.json);
    }
}
