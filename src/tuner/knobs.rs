use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::planner::{
    PlannerConfig, ScoringWeights, SelectionStrategy, DEFAULT_TOP_N, TOP_N_MAX, TOP_N_MIN,
};

/// Runtime-configurable selection knobs for tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunerKnobs {
    pub kcal_weight: f64,
    pub protein_weight: f64,
    pub carbs_weight: f64,
    pub fat_weight: f64,
    /// Rotation window over the best-scored candidates.
    pub top_n: usize,
}

impl Default for TunerKnobs {
    /// The protein-priority strategy with the default rotation window.
    fn default() -> Self {
        Self::from_weights(SelectionStrategy::ProteinPriority.weights(), DEFAULT_TOP_N)
    }
}

impl TunerKnobs {
    pub fn from_weights(weights: ScoringWeights, top_n: usize) -> Self {
        Self {
            kcal_weight: weights.kcal,
            protein_weight: weights.protein,
            carbs_weight: weights.carbs,
            fat_weight: weights.fat,
            top_n,
        }
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            kcal: self.kcal_weight,
            protein: self.protein_weight,
            carbs: self.carbs_weight,
            fat: self.fat_weight,
        }
    }

    /// Planner config with these knobs applied on top of `base`.
    pub fn apply(&self, base: &PlannerConfig) -> PlannerConfig {
        PlannerConfig {
            weights: Some(self.weights()),
            top_n: self.top_n,
            ..base.clone()
        }
    }

    /// Generate random knobs within the given ranges.
    pub fn random(rng: &mut impl Rng, ranges: &KnobRanges) -> Self {
        Self {
            kcal_weight: rng.gen_range(ranges.kcal_weight.0..=ranges.kcal_weight.1),
            protein_weight: rng.gen_range(ranges.protein_weight.0..=ranges.protein_weight.1),
            carbs_weight: rng.gen_range(ranges.carbs_weight.0..=ranges.carbs_weight.1),
            fat_weight: rng.gen_range(ranges.fat_weight.0..=ranges.fat_weight.1),
            top_n: rng.gen_range(ranges.top_n.0..=ranges.top_n.1),
        }
    }

    /// Format knobs as a compact string for display.
    pub fn display(&self) -> String {
        format!(
            "kcal={:.3} protein={:.3} carbs={:.3} fat={:.3} top_n={}",
            self.kcal_weight, self.protein_weight, self.carbs_weight, self.fat_weight, self.top_n
        )
    }
}

/// Min/max ranges for each tunable knob.
#[derive(Debug, Clone)]
pub struct KnobRanges {
    pub kcal_weight: (f64, f64),
    pub protein_weight: (f64, f64),
    pub carbs_weight: (f64, f64),
    pub fat_weight: (f64, f64),
    pub top_n: (usize, usize),
}

impl Default for KnobRanges {
    fn default() -> Self {
        Self {
            kcal_weight: (0.5, 3.0),
            protein_weight: (1.0, 6.0),
            carbs_weight: (0.5, 2.0),
            fat_weight: (0.25, 1.5),
            top_n: (TOP_N_MIN, TOP_N_MAX),
        }
    }
}
