use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::tuner::evaluation::EvaluationResult;

/// Truncate a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "kcal_weight",
        "protein_weight",
        "carbs_weight",
        "fat_weight",
        "top_n",
        "avg_accuracy",
        "avg_compliance",
        "avg_variety",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.3}", result.knobs.kcal_weight),
            format!("{:.3}", result.knobs.protein_weight),
            format!("{:.3}", result.knobs.carbs_weight),
            format!("{:.3}", result.knobs.fat_weight),
            result.knobs.top_n.to_string(),
            format!("{:.2}", result.avg_accuracy),
            format!("{:.1}", result.avg_compliance),
            format!("{:.1}", result.avg_variety),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the best result to a JSON file.
///
/// The `weights` and `top_n` keys can be pasted straight into a planner config file.
pub fn write_best_json(best: &EvaluationResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "weights": {
            "kcal": truncate(best.knobs.kcal_weight, 3),
            "protein": truncate(best.knobs.protein_weight, 3),
            "carbs": truncate(best.knobs.carbs_weight, 3),
            "fat": truncate(best.knobs.fat_weight, 3),
        },
        "top_n": best.knobs.top_n,
        "metrics": {
            "avg_accuracy": truncate(best.avg_accuracy, 2),
            "avg_compliance": truncate(best.avg_compliance, 1),
            "avg_variety": truncate(best.avg_variety, 1),
        },
        "per_profile": best.per_profile.iter().map(|r| {
            serde_json::json!({
                "kcal": r.targets.macros.kcal,
                "protein": r.targets.macros.protein,
                "meals_per_day": r.targets.meals_per_day,
                "accuracy": truncate(r.avg_accuracy, 2),
                "compliance": truncate(r.compliance, 1),
                "variety": r.variety,
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!("\n=== Top {} Results (by accuracy) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: accuracy={:.2} compliance={:.1} variety={:.1}",
            i + 1,
            result.avg_accuracy,
            result.avg_compliance,
            result.avg_variety
        );
        println!("    {}", result.knobs.display());
        println!();
    }
}
