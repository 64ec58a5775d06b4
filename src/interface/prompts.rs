use std::collections::HashSet;

use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::library::MealLibrary;
use crate::models::{DailyTargets, Meal};
use crate::planner::{RecyclePattern, SelectionStrategy};

/// Prompt for a non-negative number with a default.
fn prompt_number(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("'{}' is not a number", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "{} must be a non-negative number",
            prompt
        )));
    }
    Ok(value)
}

/// Prompt for meals per day (3 to 6).
pub fn prompt_meals_per_day() -> Result<u8> {
    let options = ["3 (no snacks)", "4 (1 snack)", "5 (2 snacks)", "6 (3 snacks)"];
    let selection = Select::new()
        .with_prompt("How many meals per day?")
        .items(&options)
        .default(1)
        .interact()?;

    Ok(3 + selection as u8)
}

/// Prompt for every daily target value not already supplied.
pub fn prompt_daily_targets(
    kcal: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    meals_per_day: Option<u8>,
) -> Result<DailyTargets> {
    let kcal = match kcal {
        Some(v) => v,
        None => prompt_number("Daily calories (kcal)", "2000")?,
    };
    let protein = match protein {
        Some(v) => v,
        None => prompt_number("Daily protein (g)", "150")?,
    };
    let carbs = match carbs {
        Some(v) => v,
        None => prompt_number("Daily carbohydrates (g)", "200")?,
    };
    let fat = match fat {
        Some(v) => v,
        None => prompt_number("Daily fat (g)", "65")?,
    };
    let meals_per_day = match meals_per_day {
        Some(v) => v,
        None => prompt_meals_per_day()?,
    };

    let targets = DailyTargets::new(kcal, protein, carbs, fat, meals_per_day);
    targets.validate()?;
    Ok(targets)
}

/// Prompt for the selection strategy.
pub fn prompt_strategy() -> Result<SelectionStrategy> {
    let options = [
        SelectionStrategy::ProteinPriority,
        SelectionStrategy::Balanced,
        SelectionStrategy::CalorieMatch,
    ];
    let labels: Vec<&str> = options.iter().map(|s| s.as_str()).collect();

    let selection = Select::new()
        .with_prompt("Selection strategy")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[selection])
}

/// Prompt for the recycling pattern.
pub fn prompt_recycle_pattern() -> Result<RecyclePattern> {
    let labels: Vec<&str> = RecyclePattern::ALL.iter().map(|p| p.as_str()).collect();

    let selection = Select::new()
        .with_prompt("Meal recycling")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(RecyclePattern::ALL[selection])
}

/// Prompt for meals that must appear in the plan, with fuzzy matching.
pub fn prompt_forced_meals(library: &MealLibrary) -> Result<Vec<Meal>> {
    let mut forced: Vec<Meal> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a meal the plan must include (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Try exact match first (id or case-insensitive name)
        if let Some(meal) = library.get(input).or_else(|| library.find_by_name(input)) {
            println!("Added: {}", meal.name);
            forced.push(meal.clone());
            continue;
        }

        let candidates = library.fuzzy_matches(input);

        if candidates.is_empty() {
            println!("No matching meal found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let meal = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", meal.name))
                .default(true)
                .interact()?;

            if confirm {
                println!("Added: {}", meal.name);
                forced.push(meal.clone());
            }
        } else {
            let options: Vec<&Meal> = candidates.iter().take(5).map(|(m, _)| *m).collect();
            let mut labels: Vec<String> = options.iter().map(|m| m.name.clone()).collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            if let Some(meal) = options.get(selection) {
                println!("Added: {}", meal.name);
                forced.push((*meal).clone());
            }
        }
    }

    let mut seen = HashSet::new();
    forced.retain(|m| seen.insert(m.id.clone()));
    Ok(forced)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
