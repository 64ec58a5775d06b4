use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Meal, MealCategory};

/// Ordered keyword set for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: MealCategory,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: MealCategory, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Infers a category for meals that do not carry one.
pub trait MealClassifier {
    fn classify(&self, meal: &Meal) -> Option<MealCategory>;
}

/// Case-insensitive substring matching of meal names against an ordered table.
///
/// The first rule (in table order) with a matching keyword wins.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
}

impl KeywordClassifier {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| KeywordRule {
                category: rule.category,
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordClassifier {
    /// English and German meal vocabulary.
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new(
                MealCategory::Breakfast,
                &[
                    "breakfast", "frühstück", "fruehstueck", "porridge", "oatmeal", "overnight oats",
                    "müsli", "muesli", "granola", "pancake", "pfannkuchen", "omelet", "omelette",
                    "scrambled", "rührei", "toast", "smoothie bowl", "bircher",
                ],
            ),
            KeywordRule::new(
                MealCategory::Lunch,
                &[
                    "lunch", "mittag", "salad", "salat", "wrap", "sandwich", "soup", "suppe",
                    "bowl", "burrito", "quinoa",
                ],
            ),
            KeywordRule::new(
                MealCategory::Dinner,
                &[
                    "dinner", "abendessen", "abendbrot", "steak", "curry", "pasta", "lasagne",
                    "lasagna", "casserole", "auflauf", "roast", "braten", "salmon", "lachs",
                    "stir fry", "pfanne", "risotto",
                ],
            ),
            KeywordRule::new(
                MealCategory::Snack,
                &[
                    "snack", "shake", "bar", "riegel", "quark", "yogurt", "yoghurt", "joghurt",
                    "nuts", "nüsse", "protein ball", "energy ball", "rice cake", "reiswaffel",
                    "fruit", "obst",
                ],
            ),
        ])
    }
}

impl MealClassifier for KeywordClassifier {
    fn classify(&self, meal: &Meal) -> Option<MealCategory> {
        let name = meal.name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| !k.is_empty() && name.contains(k)))
            .map(|rule| rule.category)
    }
}

/// Last-resort category from calories alone.
pub fn classify_by_calories(kcal: f64) -> MealCategory {
    if kcal < 300.0 {
        MealCategory::Snack
    } else if kcal < 500.0 {
        MealCategory::Breakfast
    } else if kcal < 700.0 {
        MealCategory::Lunch
    } else {
        MealCategory::Dinner
    }
}

/// Where a meal's category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Explicit(MealCategory),
    Keyword(MealCategory),
    Calories(MealCategory),
    /// Explicit but non-canonical category, or inference disabled.
    Uncategorized,
}

impl CategorySource {
    pub fn category(&self) -> Option<MealCategory> {
        match self {
            CategorySource::Explicit(c) | CategorySource::Keyword(c) | CategorySource::Calories(c) => {
                Some(*c)
            }
            CategorySource::Uncategorized => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            CategorySource::Explicit(_) => "explicit",
            CategorySource::Keyword(_) => "keyword",
            CategorySource::Calories(_) => "calories",
            CategorySource::Uncategorized => "any",
        }
    }
}

/// Resolve the category of a meal.
///
/// Explicit canonical category first; an explicit non-canonical one puts the
/// meal in the `any` bucket. Without a category, keyword inference runs and
/// then the calorie buckets, unless `infer` is false.
pub fn resolve_category(meal: &Meal, classifier: &dyn MealClassifier, infer: bool) -> CategorySource {
    match meal.explicit_category() {
        Some(explicit) => match MealCategory::parse(explicit) {
            Some(category) => CategorySource::Explicit(category),
            None => CategorySource::Uncategorized,
        },
        None if !infer => CategorySource::Uncategorized,
        None => match classifier.classify(meal) {
            Some(category) => CategorySource::Keyword(category),
            None => CategorySource::Calories(classify_by_calories(meal.macros.kcal)),
        },
    }
}

/// Meals bucketed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBuckets {
    pub breakfast: Vec<Meal>,
    pub lunch: Vec<Meal>,
    pub dinner: Vec<Meal>,
    pub snack: Vec<Meal>,
}

impl CategoryBuckets {
    pub fn get(&self, category: MealCategory) -> &[Meal] {
        match category {
            MealCategory::Breakfast => &self.breakfast,
            MealCategory::Lunch => &self.lunch,
            MealCategory::Dinner => &self.dinner,
            MealCategory::Snack => &self.snack,
        }
    }

    fn push(&mut self, category: MealCategory, meal: Meal) {
        match category {
            MealCategory::Breakfast => self.breakfast.push(meal),
            MealCategory::Lunch => self.lunch.push(meal),
            MealCategory::Dinner => self.dinner.push(meal),
            MealCategory::Snack => self.snack.push(meal),
        }
    }

    pub fn len(&self) -> usize {
        MealCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forced and regular meals per category, plus the `any` fallback bucket.
///
/// Built once per generation run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPools {
    pub forced: CategoryBuckets,
    pub regular: CategoryBuckets,
    pub any: Vec<Meal>,
}

impl MealPools {
    /// Partition `meals` and `forced` into pools.
    ///
    /// A library meal whose id is also forced only lands in the forced pool.
    /// Uncategorized forced meals join the `any` bucket.
    pub fn build(
        meals: &[Meal],
        forced: &[Meal],
        classifier: &dyn MealClassifier,
        infer: bool,
    ) -> Self {
        let mut pools = MealPools::default();
        let forced_ids: HashSet<&str> = forced.iter().map(|m| m.id.as_str()).collect();

        for meal in forced {
            match resolve_category(meal, classifier, infer).category() {
                Some(category) => pools.forced.push(category, meal.clone()),
                None => {
                    warn!(meal = %meal.name, "Forced meal has no usable category, using it as a fallback only");
                    pools.any.push(meal.clone());
                }
            }
        }

        for meal in meals.iter().filter(|m| !forced_ids.contains(m.id.as_str())) {
            match resolve_category(meal, classifier, infer).category() {
                Some(category) => pools.regular.push(category, meal.clone()),
                None => pools.any.push(meal.clone()),
            }
        }

        debug!(
            forced = pools.forced.len(),
            breakfast = pools.regular.breakfast.len(),
            lunch = pools.regular.lunch.len(),
            dinner = pools.regular.dinner.len(),
            snack = pools.regular.snack.len(),
            any = pools.any.len(),
            "Built meal pools"
        );

        pools
    }

    /// Every regular meal of every category followed by the `any` bucket.
    pub fn fallback_candidates(&self) -> Vec<&Meal> {
        MealCategory::ALL
            .iter()
            .flat_map(|c| self.regular.get(*c))
            .chain(self.any.iter())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.forced.is_empty() && self.regular.is_empty() && self.any.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;

    fn meal(id: &str, name: &str, kcal: f64) -> Meal {
        Meal::new(id, name, Macros::new(kcal, 20.0, 30.0, 10.0))
    }

    #[test]
    fn test_explicit_category_wins() {
        let classifier = KeywordClassifier::default();
        let m = meal("1", "Chicken Salad", 450.0).with_category("Dinner");
        assert_eq!(
            resolve_category(&m, &classifier, true),
            CategorySource::Explicit(MealCategory::Dinner)
        );
    }

    #[test]
    fn test_keyword_inference() {
        let classifier = KeywordClassifier::default();
        assert_eq!(
            classifier.classify(&meal("1", "Overnight Oats mit Beeren", 420.0)),
            Some(MealCategory::Breakfast)
        );
        assert_eq!(
            classifier.classify(&meal("2", "Lachs mit Reis", 650.0)),
            Some(MealCategory::Dinner)
        );
        assert_eq!(
            classifier.classify(&meal("3", "Protein Shake", 250.0)),
            Some(MealCategory::Snack)
        );
        assert_eq!(classifier.classify(&meal("4", "Mystery Plate", 250.0)), None);
    }

    #[test]
    fn test_keyword_order_breaks_ties() {
        // "smoothie bowl" (breakfast) is checked before "bowl" (lunch)
        let classifier = KeywordClassifier::default();
        assert_eq!(
            classifier.classify(&meal("1", "Berry Smoothie Bowl", 380.0)),
            Some(MealCategory::Breakfast)
        );
    }

    #[test]
    fn test_calorie_fallback_buckets() {
        assert_eq!(classify_by_calories(299.0), MealCategory::Snack);
        assert_eq!(classify_by_calories(300.0), MealCategory::Breakfast);
        assert_eq!(classify_by_calories(650.0), MealCategory::Lunch);
        assert_eq!(classify_by_calories(700.0), MealCategory::Dinner);

        let classifier = KeywordClassifier::default();
        assert_eq!(
            resolve_category(&meal("1", "Mystery Plate", 800.0), &classifier, true),
            CategorySource::Calories(MealCategory::Dinner)
        );
    }

    #[test]
    fn test_non_canonical_category_goes_to_any() {
        let classifier = KeywordClassifier::default();
        let dessert = meal("1", "Tiramisu", 400.0).with_category("dessert");
        let plain = meal("2", "Plain Rice", 400.0);

        let pools = MealPools::build(&[dessert, plain.clone()], &[], &classifier, false);
        assert_eq!(pools.any.len(), 2);
        assert!(pools.regular.is_empty());

        let pools = MealPools::build(&[plain], &[], &classifier, true);
        assert_eq!(pools.regular.breakfast.len(), 1);
    }

    #[test]
    fn test_forced_meals_removed_from_regular_pool() {
        let classifier = KeywordClassifier::default();
        let shake = meal("s", "Protein Shake", 200.0);
        let salad = meal("l", "Greek Salad", 550.0);

        let pools = MealPools::build(&[shake.clone(), salad], &[shake], &classifier, true);
        assert_eq!(pools.forced.snack.len(), 1);
        assert!(pools.regular.snack.is_empty());
        assert_eq!(pools.regular.lunch.len(), 1);
        assert_eq!(pools.fallback_candidates().len(), 1);
    }

    #[test]
    fn test_custom_keyword_table() {
        let classifier = KeywordClassifier::new(vec![KeywordRule {
            category: MealCategory::Snack,
            keywords: vec!["TIRAMISU".to_string()],
        }]);
        assert_eq!(
            classifier.classify(&meal("1", "Tiramisu Cup", 400.0)),
            Some(MealCategory::Snack)
        );
    }
}
