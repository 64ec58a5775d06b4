use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::Macros;

/// Coach-set daily targets for one client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    #[serde(flatten)]
    pub macros: Macros,

    pub meals_per_day: u8,
}

impl DailyTargets {
    pub fn new(kcal: f64, protein: f64, carbs: f64, fat: f64, meals_per_day: u8) -> Self {
        Self {
            macros: Macros::new(kcal, protein, carbs, fat),
            meals_per_day,
        }
    }

    /// Number of snack slots implied by `meals_per_day`.
    #[inline]
    pub fn snack_count(&self) -> usize {
        usize::from(self.meals_per_day.saturating_sub(3))
    }

    /// Reject inputs the planner cannot work with before generation begins.
    pub fn validate(&self) -> Result<()> {
        if !(3..=6).contains(&self.meals_per_day) {
            return Err(PlanError::InvalidTargets(format!(
                "meals per day must be between 3 and 6, got {}",
                self.meals_per_day
            )));
        }
        if !self.macros.is_non_negative() {
            return Err(PlanError::InvalidTargets(format!(
                "macro targets must be non-negative numbers ({})",
                self.macros
            )));
        }
        if self.macros.kcal <= 0.0 {
            return Err(PlanError::InvalidTargets(
                "calorie target must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-slot targets derived from [`DailyTargets`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotTargets {
    pub breakfast: Macros,
    pub lunch: Macros,
    pub dinner: Macros,

    /// Aggregate snack target before it is split across snack slots.
    pub snack_total: Macros,

    /// One share per snack slot; empty for three meals a day.
    pub snacks: Vec<Macros>,
}

impl SlotTargets {
    /// Sum of all slot targets (may drift from the daily figure by rounding).
    pub fn total(&self) -> Macros {
        self.snacks
            .iter()
            .fold(self.breakfast + self.lunch + self.dinner, |acc, s| acc + *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_meals_per_day() {
        assert!(DailyTargets::new(2000.0, 150.0, 200.0, 67.0, 4).validate().is_ok());
        assert!(DailyTargets::new(2000.0, 150.0, 200.0, 67.0, 2).validate().is_err());
        assert!(DailyTargets::new(2000.0, 150.0, 200.0, 67.0, 7).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_and_zero_kcal() {
        assert!(DailyTargets::new(2000.0, -1.0, 200.0, 67.0, 3).validate().is_err());
        assert!(DailyTargets::new(0.0, 150.0, 200.0, 67.0, 3).validate().is_err());
        assert!(DailyTargets::new(f64::NAN, 150.0, 200.0, 67.0, 3).validate().is_err());
    }

    #[test]
    fn test_zero_fat_target_is_allowed() {
        assert!(DailyTargets::new(1800.0, 140.0, 180.0, 0.0, 5).validate().is_ok());
    }

    #[test]
    fn test_snack_count() {
        assert_eq!(DailyTargets::new(2000.0, 1.0, 1.0, 1.0, 3).snack_count(), 0);
        assert_eq!(DailyTargets::new(2000.0, 1.0, 1.0, 1.0, 6).snack_count(), 3);
    }
}
