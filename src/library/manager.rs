use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::Meal;

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// In-memory view of the meal library, in load order.
pub struct MealLibrary {
    meals: Vec<Meal>,
    /// Index into `meals` keyed by id.
    by_id: HashMap<String, usize>,
}

impl MealLibrary {
    /// Create a library from a list of meals. Later duplicates of an id replace earlier ones.
    pub fn new(meals: Vec<Meal>) -> Self {
        let mut library = Self {
            meals: Vec::with_capacity(meals.len()),
            by_id: HashMap::new(),
        };
        for meal in meals {
            match library.by_id.get(&meal.id) {
                Some(&idx) => library.meals[idx] = meal,
                None => {
                    library.by_id.insert(meal.id.clone(), library.meals.len());
                    library.meals.push(meal);
                }
            }
        }
        library
    }

    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.by_id.get(id).map(|&idx| &self.meals[idx])
    }

    /// Get a meal by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Meal> {
        let needle = name.trim().to_lowercase();
        self.meals.iter().find(|m| m.name.to_lowercase() == needle)
    }

    /// Meals whose names resemble `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str) -> Vec<(&Meal, f64)> {
        let needle = name.trim().to_lowercase();
        let mut candidates: Vec<(&Meal, f64)> = self
            .meals
            .iter()
            .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &needle)))
            .filter(|(_, score)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    /// Resolve a meal reference given as id, exact name, or close-enough name.
    pub fn resolve(&self, reference: &str) -> Result<&Meal> {
        self.get(reference.trim())
            .or_else(|| self.find_by_name(reference))
            .or_else(|| self.fuzzy_matches(reference).first().map(|(m, _)| *m))
            .ok_or_else(|| PlanError::MealNotFound(reference.to_string()))
    }

    /// Resolve several references, failing on the first unknown one.
    pub fn resolve_all(&self, references: &[String]) -> Result<Vec<Meal>> {
        references
            .iter()
            .map(|r| self.resolve(r).cloned())
            .collect()
    }

    /// Meals that fail basic validation (negative macros).
    pub fn invalid_meals(&self) -> Vec<&Meal> {
        self.meals.iter().filter(|m| !m.is_valid()).collect()
    }

    /// Meals that cannot be portioned (no calories).
    pub fn unscalable_meals(&self) -> Vec<&Meal> {
        self.meals.iter().filter(|m| !m.is_scalable()).collect()
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;

    fn sample_meals() -> Vec<Meal> {
        vec![
            Meal::new("m1", "Chicken Salad", Macros::new(550.0, 45.0, 30.0, 25.0)),
            Meal::new("m2", "Overnight Oats", Macros::new(420.0, 25.0, 60.0, 10.0)),
            Meal::new("m3", "Water", Macros::new(0.0, 0.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn test_get_and_name_lookup() {
        let library = MealLibrary::new(sample_meals());
        assert_eq!(library.get("m2").unwrap().name, "Overnight Oats");
        assert!(library.find_by_name("chicken SALAD").is_some());
        assert!(library.find_by_name("pizza").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_position_last_wins() {
        let mut meals = sample_meals();
        meals.push(Meal::new("m1", "Chicken Caesar", Macros::new(600.0, 40.0, 35.0, 30.0)));
        let library = MealLibrary::new(meals);
        assert_eq!(library.len(), 3);
        assert_eq!(library.meals()[0].name, "Chicken Caesar");
    }

    #[test]
    fn test_fuzzy_resolve() {
        let library = MealLibrary::new(sample_meals());
        assert_eq!(library.resolve("Chiken Salad").unwrap().id, "m1");
        assert_eq!(library.resolve("m2").unwrap().id, "m2");
        assert!(matches!(
            library.resolve("Beef Wellington"),
            Err(PlanError::MealNotFound(_))
        ));
    }

    #[test]
    fn test_unscalable_meals() {
        let library = MealLibrary::new(sample_meals());
        let unscalable = library.unscalable_meals();
        assert_eq!(unscalable.len(), 1);
        assert_eq!(unscalable[0].id, "m3");
        assert!(library.invalid_meals().is_empty());
    }
}
