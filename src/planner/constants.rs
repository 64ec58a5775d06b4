use crate::models::MealCategory;

/// Share of the daily target per slot, keyed by meals per day.
///
/// Columns are breakfast, lunch, dinner, snack aggregate (percent).
pub const SLOT_PERCENTAGES: [(u8, [f64; 4]); 4] = [
    (3, [30.0, 35.0, 35.0, 0.0]),
    (4, [25.0, 30.0, 35.0, 10.0]),
    (5, [20.0, 25.0, 30.0, 25.0]),
    (6, [18.0, 22.0, 28.0, 32.0]),
];

/// Look up the percentage row for `meals_per_day`.
pub fn slot_percentages(meals_per_day: u8) -> Option<[f64; 4]> {
    SLOT_PERCENTAGES
        .iter()
        .find(|(count, _)| *count == meals_per_day)
        .map(|(_, row)| *row)
}

// ─────────────────────────────────────────────────────────────────────────────
// Portion scaling
// ─────────────────────────────────────────────────────────────────────────────

/// Global scale bound applied to every portion.
pub const GLOBAL_SCALE_MIN: f64 = 0.5;
pub const GLOBAL_SCALE_MAX: f64 = 3.0;

/// Weights combining per-macro ratios into one scale factor.
pub const SCALE_WEIGHT_PROTEIN: f64 = 0.4;
pub const SCALE_WEIGHT_KCAL: f64 = 0.3;
pub const SCALE_WEIGHT_CARBS: f64 = 0.2;
pub const SCALE_WEIGHT_FAT: f64 = 0.1;

/// Narrower bound used when a meal is scaled for a specific slot.
pub fn slot_scale_bounds(category: MealCategory) -> (f64, f64) {
    match category {
        MealCategory::Breakfast => (0.6, 1.8),
        MealCategory::Lunch => (0.7, 2.0),
        MealCategory::Dinner => (0.8, 2.2),
        MealCategory::Snack => (0.5, 1.5),
    }
}

/// Portion labels by minimum scale, largest first.
pub const PORTION_LABELS: [(f64, &str); 7] = [
    (2.0, "extra-extra-large"),
    (1.6, "extra-large"),
    (1.3, "large"),
    (1.1, "large-normal"),
    (0.9, "normal"),
    (0.7, "small"),
    (0.5, "mini"),
];

/// Label for scales below every threshold.
pub const PORTION_LABEL_TINY: &str = "tiny";

/// Get the portion label for a scale factor.
pub fn portion_label(scale: f64) -> &'static str {
    PORTION_LABELS
        .iter()
        .find(|(min, _)| scale >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(PORTION_LABEL_TINY)
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Candidate count at or below which selection is plain round-robin.
pub const ROUND_ROBIN_MAX_CANDIDATES: usize = 3;

/// Rotation window over the best-scored candidates.
pub const DEFAULT_TOP_N: usize = 3;
pub const TOP_N_MIN: usize = 3;
pub const TOP_N_MAX: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Accuracy and compliance
// ─────────────────────────────────────────────────────────────────────────────

/// Weights of the combined day accuracy.
pub const ACCURACY_WEIGHT_PROTEIN: f64 = 0.4;
pub const ACCURACY_WEIGHT_KCAL: f64 = 0.3;
pub const ACCURACY_WEIGHT_CARBS: f64 = 0.2;
pub const ACCURACY_WEIGHT_FAT: f64 = 0.1;

/// Days in a generated week.
pub const DAYS_PER_WEEK: usize = 7;

pub const COMPLIANCE_START: f64 = 100.0;

/// (accuracy threshold, penalty) pairs; every threshold the day falls under applies.
pub const PROTEIN_COMPLIANCE_PENALTIES: [(f64, f64); 2] = [(90.0, 5.0), (80.0, 10.0)];
pub const KCAL_COMPLIANCE_PENALTIES: [(f64, f64); 2] = [(90.0, 3.0), (80.0, 7.0)];

// ─────────────────────────────────────────────────────────────────────────────
// Fine-tuning
// ─────────────────────────────────────────────────────────────────────────────

/// Days below this weighted accuracy get a corrective pass.
pub const DEFAULT_MIN_ACCURACY: f64 = 85.0;

/// Protein shortfall (g) that triggers a correction.
pub const PROTEIN_GAP_THRESHOLD: f64 = 10.0;

/// Fraction of the computed correction actually applied.
pub const FINE_TUNE_DAMPING: f64 = 0.5;

/// Bound on the corrected scale.
pub const FINE_TUNE_SCALE_MIN: f64 = 0.5;
pub const FINE_TUNE_SCALE_MAX: f64 = 2.5;

/// Round a scale factor to two decimals.
#[inline]
pub fn round_scale(scale: f64) -> f64 {
    (scale * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_percentages_sum_to_100() {
        for (count, row) in SLOT_PERCENTAGES {
            let sum: f64 = row.iter().sum();
            assert!((sum - 100.0).abs() < 1e-9, "row for {} sums to {}", count, sum);
        }
        assert!(slot_percentages(7).is_none());
    }

    #[test]
    fn test_portion_label_thresholds() {
        assert_eq!(portion_label(2.0), "extra-extra-large");
        assert_eq!(portion_label(1.6), "extra-large");
        assert_eq!(portion_label(1.59), "large");
        assert_eq!(portion_label(1.1), "large-normal");
        assert_eq!(portion_label(1.0), "normal");
        assert_eq!(portion_label(0.7), "small");
        assert_eq!(portion_label(0.5), "mini");
        assert_eq!(portion_label(0.49), "tiny");
    }

    #[test]
    fn test_slot_bounds_inside_global_bound() {
        for category in MealCategory::ALL {
            let (min, max) = slot_scale_bounds(category);
            assert!(min >= GLOBAL_SCALE_MIN && max <= GLOBAL_SCALE_MAX);
            assert!(min <= 1.0 && max >= 1.0);
        }
    }
}
