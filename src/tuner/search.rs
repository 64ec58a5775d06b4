use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::models::{DailyTargets, Meal};
use crate::planner::PlannerConfig;
use crate::tuner::evaluation::{evaluate_knobs, EvaluationResult};
use crate::tuner::knobs::{KnobRanges, TunerKnobs};

/// Configuration for the tuner.
pub struct TunerConfig {
    pub iterations: usize,
    pub seed: u64,
    /// Client profiles every candidate is evaluated against.
    pub profiles: Vec<DailyTargets>,
    pub ranges: KnobRanges,
    /// Planner options shared by every candidate.
    pub base: PlannerConfig,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            seed: 123,
            profiles: default_profiles(),
            ranges: KnobRanges::default(),
            base: PlannerConfig::default(),
        }
    }
}

/// A spread of typical cutting, maintenance and bulking clients.
pub fn default_profiles() -> Vec<DailyTargets> {
    vec![
        DailyTargets::new(1600.0, 130.0, 150.0, 55.0, 3),
        DailyTargets::new(2000.0, 150.0, 200.0, 67.0, 4),
        DailyTargets::new(2500.0, 180.0, 270.0, 80.0, 5),
        DailyTargets::new(3200.0, 210.0, 380.0, 95.0, 6),
    ]
}

/// Results from a tuning run.
pub struct TunerResults {
    /// All evaluation results, sorted best to worst by lexicographic comparison.
    pub results: Vec<EvaluationResult>,
    /// The baseline result using the protein-priority weights.
    pub baseline: EvaluationResult,
}

impl TunerResults {
    pub fn best(&self) -> &EvaluationResult {
        self.results.first().unwrap_or(&self.baseline)
    }
}

/// Run random-search tuning.
pub fn run_tuner(config: TunerConfig, meals: &[Meal]) -> TunerResults {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = Vec::with_capacity(config.iterations);

    let baseline_knobs = TunerKnobs::default();
    let baseline = evaluate_knobs(&baseline_knobs, meals, &config.profiles, &config.base);

    println!(
        "Baseline: accuracy={:.2} compliance={:.1} variety={:.1}",
        baseline.avg_accuracy, baseline.avg_compliance, baseline.avg_variety
    );
    println!("    {}\n", baseline_knobs.display());

    info!(
        iterations = config.iterations,
        profiles = config.profiles.len(),
        "starting random search"
    );

    let mut best_accuracy = baseline.avg_accuracy;

    for i in 0..config.iterations {
        let knobs = TunerKnobs::random(&mut rng, &config.ranges);
        let result = evaluate_knobs(&knobs, meals, &config.profiles, &config.base);

        if result.avg_accuracy > best_accuracy {
            best_accuracy = result.avg_accuracy;
            println!(
                "[{}/{}] New best: accuracy={:.2} compliance={:.1} variety={:.1}",
                i + 1,
                config.iterations,
                result.avg_accuracy,
                result.avg_compliance,
                result.avg_variety
            );
        }

        results.push(result);

        if (i + 1) % (config.iterations / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / config.iterations as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    eprintln!();

    results.sort_by(|a, b| b.cmp_score(a));

    TunerResults { results, baseline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;

    #[test]
    fn test_run_tuner_sorted_best_first() {
        let meals = vec![
            Meal::new("b1", "Oatmeal", Macros::new(400.0, 20.0, 60.0, 10.0)),
            Meal::new("l1", "Tuna Wrap", Macros::new(600.0, 45.0, 55.0, 20.0)),
            Meal::new("d1", "Salmon Rice", Macros::new(700.0, 45.0, 70.0, 25.0)),
            Meal::new("s1", "Protein Bar", Macros::new(220.0, 20.0, 22.0, 7.0)),
        ];
        let config = TunerConfig {
            iterations: 8,
            profiles: vec![DailyTargets::new(2000.0, 150.0, 200.0, 67.0, 4)],
            ..Default::default()
        };

        let results = run_tuner(config, &meals);
        assert_eq!(results.results.len(), 8);
        for pair in results.results.windows(2) {
            assert_ne!(pair[0].cmp_score(&pair[1]), std::cmp::Ordering::Less);
        }
        assert!(results.best().avg_accuracy >= results.results[7].avg_accuracy);
    }
}
