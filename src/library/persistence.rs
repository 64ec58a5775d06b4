use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::library::MealLibrary;
use crate::models::{Meal, WeekPlan};
use crate::planner::PlannerConfig;

/// Weekday names, day index 0 first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Load meals from a JSON file.
///
/// Deduplicates by id (last occurrence wins, first position kept).
pub fn load_meals<P: AsRef<Path>>(path: P) -> Result<Vec<Meal>> {
    let content = fs::read_to_string(path.as_ref())?;
    let meals: Vec<Meal> = serde_json::from_str(&content)?;
    let loaded = meals.len();

    let library = MealLibrary::new(meals);
    if library.len() < loaded {
        warn!(
            duplicates = loaded - library.len(),
            "Duplicate meal ids in library, later entries replaced earlier ones"
        );
    }
    info!(path = %path.as_ref().display(), meals = library.len(), "Loaded meal library");

    Ok(library.meals().to_vec())
}

/// Load planner options from a JSON file. Missing fields take defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a week plan as pretty JSON.
pub fn save_week_plan<P: AsRef<Path>>(path: P, plan: &WeekPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Export one row per filled slot for downstream storage.
pub fn export_week_csv<P: AsRef<Path>>(path: P, plan: &WeekPlan) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "day",
        "weekday",
        "slot",
        "meal_id",
        "meal_name",
        "scale",
        "portion",
        "kcal",
        "protein",
        "carbs",
        "fat",
        "recycled_from",
        "fine_tuned",
    ])?;

    for day in &plan.days {
        let weekday = WEEKDAYS.get(day.day_index).copied().unwrap_or("");
        for (kind, meal) in day.filled_slots() {
            wtr.write_record([
                day.day_index.to_string(),
                weekday.to_string(),
                kind.to_string(),
                meal.meal_id.clone(),
                meal.meal_name.clone(),
                format!("{:.2}", meal.scale),
                meal.portion_label.to_string(),
                format!("{:.0}", meal.macros.kcal),
                format!("{:.0}", meal.macros.protein),
                format!("{:.0}", meal.macros.carbs),
                format!("{:.0}", meal.macros.fat),
                meal.recycled_from.map(|d| d.to_string()).unwrap_or_default(),
                meal.fine_tuned.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::DailyTargets;
    use crate::planner::generate_week_plan;

    const LIBRARY_JSON: &str = r#"[
        {"id": "b1", "name": "Protein Porridge", "category": "breakfast", "kcal": 450, "protein": 35, "carbs": 55, "fat": 10},
        {"id": "l1", "name": "Chicken Salad", "category": "lunch", "kcal": 550, "protein": 45, "carbs": 30, "fat": 25,
         "ingredients": [{"name": "Chicken breast", "amount": 150, "unit": "g", "kcal": 165, "protein": 35}]},
        {"id": "d1", "name": "Beef Curry", "kcal": 800, "protein": 50, "carbs": 80, "fat": 30},
        {"id": "d1", "name": "Beef Curry Light", "kcal": 700, "protein": 50, "carbs": 70, "fat": 20}
    ]"#;

    fn library_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LIBRARY_JSON.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_meals_deduplicates() {
        let file = library_file();
        let meals = load_meals(file.path()).unwrap();
        assert_eq!(meals.len(), 3);
        assert_eq!(meals[2].name, "Beef Curry Light");
        assert_eq!(meals[1].ingredients[0].macros.fat, 0.0);
    }

    #[test]
    fn test_load_config_partial() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"top_n": 5, "fine_tune": false}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.top_n, 5);
        assert!(!config.fine_tune);
        assert!(config.allow_scaling);
    }

    #[test]
    fn test_save_and_export_plan() {
        let meals = load_meals(library_file().path()).unwrap();
        let targets = DailyTargets::new(1800.0, 140.0, 160.0, 60.0, 3);
        let plan = generate_week_plan(&meals, &[], &targets, &PlannerConfig::default()).unwrap();

        let json_file = NamedTempFile::new().unwrap();
        save_week_plan(json_file.path(), &plan).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(json_file.path()).unwrap()).unwrap();
        assert_eq!(saved["days"].as_array().unwrap().len(), 7);
        assert!(saved["days"][0]["breakfast"]["source"].is_null());

        let csv_file = NamedTempFile::new().unwrap();
        export_week_csv(csv_file.path(), &plan).unwrap();
        let mut reader = csv::Reader::from_path(csv_file.path()).unwrap();
        let rows = reader.records().count();
        // three filled slots per day
        assert_eq!(rows, 21);
    }
}
