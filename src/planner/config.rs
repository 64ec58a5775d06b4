use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::planner::classify::{KeywordClassifier, KeywordRule};
use crate::planner::constants::{
    DEFAULT_MIN_ACCURACY, DEFAULT_TOP_N, PROTEIN_GAP_THRESHOLD, TOP_N_MAX, TOP_N_MIN,
};

/// Per-macro weights of the selection score (lower score = closer match).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// How candidates are ranked when a slot has enough of them to score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    #[default]
    ProteinPriority,
    Balanced,
    CalorieMatch,
}

impl SelectionStrategy {
    pub fn weights(&self) -> ScoringWeights {
        match self {
            SelectionStrategy::ProteinPriority => ScoringWeights {
                kcal: 1.0,
                protein: 5.0,
                carbs: 1.5,
                fat: 1.0,
            },
            SelectionStrategy::Balanced => ScoringWeights {
                kcal: 1.0,
                protein: 1.0,
                carbs: 1.0,
                fat: 1.0,
            },
            SelectionStrategy::CalorieMatch => ScoringWeights {
                kcal: 3.0,
                protein: 1.5,
                carbs: 1.0,
                fat: 0.5,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::ProteinPriority => "protein-priority",
            SelectionStrategy::Balanced => "balanced",
            SelectionStrategy::CalorieMatch => "calorie-match",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionStrategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "protein-priority" | "protein" => Ok(SelectionStrategy::ProteinPriority),
            "balanced" => Ok(SelectionStrategy::Balanced),
            "calorie-match" | "calories" => Ok(SelectionStrategy::CalorieMatch),
            other => Err(PlanError::InvalidInput(format!(
                "unknown strategy '{}' (expected protein-priority, balanced or calorie-match)",
                other
            ))),
        }
    }
}

/// Named rule sets that reuse earlier days' meals to cut meal-prep variety.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecyclePattern {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
    Mealprep,
}

impl RecyclePattern {
    pub const ALL: [RecyclePattern; 5] = [
        RecyclePattern::None,
        RecyclePattern::Light,
        RecyclePattern::Medium,
        RecyclePattern::Heavy,
        RecyclePattern::Mealprep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecyclePattern::None => "none",
            RecyclePattern::Light => "light",
            RecyclePattern::Medium => "medium",
            RecyclePattern::Heavy => "heavy",
            RecyclePattern::Mealprep => "mealprep",
        }
    }
}

impl fmt::Display for RecyclePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecyclePattern {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecyclePattern::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim().to_lowercase().replace(['-', '_'], ""))
            .ok_or_else(|| {
                PlanError::InvalidInput(format!(
                    "unknown recycle pattern '{}' (expected none, light, medium, heavy or mealprep)",
                    s
                ))
            })
    }
}

/// Runtime options for one plan-generation call.
///
/// Every field has a default, so a partial JSON config file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub strategy: SelectionStrategy,

    /// Overrides the strategy's weight table when set.
    pub weights: Option<ScoringWeights>,

    /// Size of the rotation window over the best-scored candidates.
    pub top_n: usize,

    pub recycle: RecyclePattern,

    /// Serve every meal at its base portion when false.
    pub allow_scaling: bool,

    pub fine_tune: bool,

    /// Days below this weighted accuracy are fine-tuned.
    pub min_accuracy: f64,

    pub protein_gap_threshold: f64,

    /// Infer a category from name and calories for meals without one.
    pub infer_categories: bool,

    /// Replaces the built-in keyword table when set.
    pub keywords: Option<Vec<KeywordRule>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::default(),
            weights: None,
            top_n: DEFAULT_TOP_N,
            recycle: RecyclePattern::default(),
            allow_scaling: true,
            fine_tune: true,
            min_accuracy: DEFAULT_MIN_ACCURACY,
            protein_gap_threshold: PROTEIN_GAP_THRESHOLD,
            infer_categories: true,
            keywords: None,
        }
    }
}

impl PlannerConfig {
    /// Weights actually used for scoring.
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.weights.unwrap_or_else(|| self.strategy.weights())
    }

    /// Keyword classifier from the configured table, or the built-in one.
    pub fn classifier(&self) -> KeywordClassifier {
        match &self.keywords {
            Some(rules) => KeywordClassifier::new(rules.clone()),
            None => KeywordClassifier::default(),
        }
    }

    /// Rotation window, kept within the supported range.
    pub fn rotation_window(&self) -> usize {
        self.top_n.clamp(TOP_N_MIN, TOP_N_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"strategy": "calorie-match", "recycle": "light"}"#).unwrap();
        assert_eq!(config.strategy, SelectionStrategy::CalorieMatch);
        assert_eq!(config.recycle, RecyclePattern::Light);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.allow_scaling);
        assert_eq!(config.min_accuracy, DEFAULT_MIN_ACCURACY);
    }

    #[test]
    fn test_custom_weights_override_strategy() {
        let custom = ScoringWeights {
            kcal: 2.0,
            protein: 2.0,
            carbs: 2.0,
            fat: 2.0,
        };
        let config = PlannerConfig {
            weights: Some(custom),
            ..Default::default()
        };
        assert_eq!(config.scoring_weights(), custom);
        assert_eq!(
            PlannerConfig::default().scoring_weights(),
            SelectionStrategy::ProteinPriority.weights()
        );
    }

    #[test]
    fn test_rotation_window_clamped() {
        let wide = PlannerConfig {
            top_n: 12,
            ..Default::default()
        };
        let narrow = PlannerConfig {
            top_n: 1,
            ..Default::default()
        };
        assert_eq!(wide.rotation_window(), TOP_N_MAX);
        assert_eq!(narrow.rotation_window(), TOP_N_MIN);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "Protein_Priority".parse::<SelectionStrategy>().unwrap(),
            SelectionStrategy::ProteinPriority
        );
        assert_eq!("meal-prep".parse::<RecyclePattern>().unwrap(), RecyclePattern::Mealprep);
        assert!("weekly".parse::<RecyclePattern>().is_err());
    }
}
