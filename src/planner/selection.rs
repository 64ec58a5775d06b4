use tracing::debug;

use crate::models::{Macros, Meal, MealCategory, ScaledMeal};
use crate::planner::classify::MealPools;
use crate::planner::config::{PlannerConfig, ScoringWeights};
use crate::planner::constants::ROUND_ROBIN_MAX_CANDIDATES;
use crate::planner::scaling::portion_for_slot;

/// A scaled candidate with its selection score.
#[derive(Debug)]
struct Candidate {
    scaled: ScaledMeal,
    score: f64,
}

/// Weighted absolute macro difference between a portion and its target.
///
/// Lower is better.
pub fn score_portion(macros: &Macros, target: &Macros, weights: &ScoringWeights) -> f64 {
    weights.kcal * (macros.kcal - target.kcal).abs()
        + weights.protein * (macros.protein - target.protein).abs()
        + weights.carbs * (macros.carbs - target.carbs).abs()
        + weights.fat * (macros.fat - target.fat).abs()
}

/// Round-robin from `day_index mod len`, skipping meals that cannot be portioned.
fn pick_rotating(
    candidates: &[&Meal],
    slot: MealCategory,
    target: &Macros,
    day_index: usize,
    allow_scaling: bool,
) -> Option<ScaledMeal> {
    let len = candidates.len();
    if len == 0 {
        return None;
    }

    let start = day_index % len;
    (0..len)
        .map(|offset| candidates[(start + offset) % len])
        .find_map(|meal| portion_for_slot(meal, target, slot, allow_scaling))
}

/// Score every candidate and rotate through the best few by `day_index`.
///
/// Deliberately not always the single best match, so consecutive days vary.
fn pick_scored(
    candidates: &[&Meal],
    slot: MealCategory,
    target: &Macros,
    day_index: usize,
    config: &PlannerConfig,
) -> Option<ScaledMeal> {
    let weights = config.scoring_weights();

    let mut scored: Vec<Candidate> = candidates
        .iter()
        .filter_map(|meal| portion_for_slot(meal, target, slot, config.allow_scaling))
        .map(|scaled| {
            let score = score_portion(&scaled.macros, target, &weights);
            Candidate { scaled, score }
        })
        .collect();

    if scored.is_empty() {
        return None;
    }

    // Stable sort keeps pool order among equal scores.
    scored.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));

    let top = config.rotation_window().min(scored.len());
    let pick = day_index % top;

    debug!(
        slot = %slot,
        day_index,
        candidates = scored.len(),
        top,
        pick,
        meal = %scored[pick].scaled.meal_name,
        score = scored[pick].score,
        "Selected scored meal"
    );

    Some(scored.swap_remove(pick).scaled)
}

/// Choose and portion a meal for one slot.
///
/// 1. Forced meals for the slot rotate by `day_index` and always win.
/// 2. Otherwise the regular pool for the slot, falling back to every regular
///    meal plus the `any` bucket when the slot's pool is empty or holds
///    nothing that can be portioned.
/// 3. Up to three candidates rotate without scoring; more are scored and the
///    pick rotates through the best `top_n`.
///
/// Returns `None` when nothing can fill the slot.
pub fn select_meal(
    pools: &MealPools,
    slot: MealCategory,
    target: &Macros,
    day_index: usize,
    config: &PlannerConfig,
) -> Option<ScaledMeal> {
    let forced: Vec<&Meal> = pools.forced.get(slot).iter().collect();
    if let Some(scaled) = pick_rotating(&forced, slot, target, day_index, config.allow_scaling) {
        debug!(slot = %slot, day_index, meal = %scaled.meal_name, "Selected forced meal");
        return Some(scaled);
    }

    let regular: Vec<&Meal> = pools.regular.get(slot).iter().collect();
    if !regular.is_empty() {
        if let Some(scaled) = pick_from(&regular, slot, target, day_index, config) {
            return Some(scaled);
        }
        debug!(slot = %slot, day_index, "No fillable meal in category, using fallback pool");
    } else {
        debug!(slot = %slot, "No meals in category, using fallback pool");
    }

    let picked = pick_from(&pools.fallback_candidates(), slot, target, day_index, config);
    if picked.is_none() {
        debug!(slot = %slot, day_index, "Slot left unfilled");
    }
    picked
}

/// Round-robin for a handful of candidates, scored rotation otherwise.
fn pick_from(
    candidates: &[&Meal],
    slot: MealCategory,
    target: &Macros,
    day_index: usize,
    config: &PlannerConfig,
) -> Option<ScaledMeal> {
    if candidates.len() <= ROUND_ROBIN_MAX_CANDIDATES {
        pick_rotating(candidates, slot, target, day_index, config.allow_scaling)
    } else {
        pick_scored(candidates, slot, target, day_index, config)
    }
}
