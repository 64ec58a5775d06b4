use crate::models::{DailyTargets, Meal};
use crate::planner::{generate_week_plan, PlannerConfig};
use crate::tuner::knobs::TunerKnobs;

/// Result of evaluating one client profile.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub targets: DailyTargets,
    pub avg_accuracy: f64,
    pub compliance: f64,
    pub variety: usize,
}

/// Aggregated result of evaluating knobs across several profiles.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub knobs: TunerKnobs,
    pub avg_accuracy: f64,
    pub avg_compliance: f64,
    pub avg_variety: f64,
    pub per_profile: Vec<ProfileResult>,
}

impl EvaluationResult {
    /// Lexicographic comparison: (avg_accuracy, avg_compliance, avg_variety).
    /// Higher is better for all metrics.
    pub fn cmp_score(&self, other: &Self) -> std::cmp::Ordering {
        match self.avg_accuracy.partial_cmp(&other.avg_accuracy) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match self.avg_compliance.partial_cmp(&other.avg_compliance) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.avg_variety
            .partial_cmp(&other.avg_variety)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Evaluate knobs for one profile.
///
/// Profiles with invalid targets score zero rather than aborting the search.
pub fn evaluate_profile(
    meals: &[Meal],
    targets: &DailyTargets,
    knobs: &TunerKnobs,
    base: &PlannerConfig,
) -> ProfileResult {
    let config = knobs.apply(base);

    match generate_week_plan(meals, &[], targets, &config) {
        Ok(plan) => ProfileResult {
            targets: *targets,
            avg_accuracy: plan.average_accuracy(),
            compliance: plan.stats.compliance_score,
            variety: plan.stats.variety,
        },
        Err(_) => ProfileResult {
            targets: *targets,
            avg_accuracy: 0.0,
            compliance: 0.0,
            variety: 0,
        },
    }
}

/// Evaluate knobs across every profile.
pub fn evaluate_knobs(
    knobs: &TunerKnobs,
    meals: &[Meal],
    profiles: &[DailyTargets],
    base: &PlannerConfig,
) -> EvaluationResult {
    let per_profile: Vec<ProfileResult> = profiles
        .iter()
        .map(|targets| evaluate_profile(meals, targets, knobs, base))
        .collect();

    let n = per_profile.len().max(1) as f64;
    let avg_accuracy = per_profile.iter().map(|r| r.avg_accuracy).sum::<f64>() / n;
    let avg_compliance = per_profile.iter().map(|r| r.compliance).sum::<f64>() / n;
    let avg_variety = per_profile.iter().map(|r| r.variety as f64).sum::<f64>() / n;

    EvaluationResult {
        knobs: knobs.clone(),
        avg_accuracy,
        avg_compliance,
        avg_variety,
        per_profile,
    }
}
