use crate::library::WEEKDAYS;
use crate::models::{DayPlan, Meal, WeekPlan};
use crate::planner::{CategorySource, PlannerConfig};

/// Display a week plan day by day, followed by the week summary.
pub fn display_week_plan(plan: &WeekPlan, config: &PlannerConfig) {
    if plan.days.iter().all(DayPlan::is_empty) {
        println!("No meal plan generated (the meal library has no usable meals).");
        return;
    }

    println!();
    println!(
        "=== Week Plan ({} / recycling: {}) ===",
        config.strategy, config.recycle
    );

    for day in &plan.days {
        display_day(day);
    }

    let stats = &plan.stats;
    println!("--- Week Summary ---");
    println!("Daily average: {}", stats.average);
    println!("Average accuracy: {:.1}%", plan.average_accuracy());
    println!("Distinct meals: {}", stats.variety);
    println!("Recycled meals: {}", stats.recycled_meals);
    println!("Compliance score: {:.0}/100", stats.compliance_score);
    println!();
}

/// Display one day: each slot with portion, then totals against targets.
pub fn display_day(day: &DayPlan) {
    let weekday = WEEKDAYS.get(day.day_index).copied().unwrap_or("Day");

    println!();
    println!("{} (day {})", weekday, day.day_index + 1);

    let name_width = day
        .filled_slots()
        .iter()
        .map(|(_, m)| m.meal_name.len())
        .max()
        .unwrap_or(10);

    for kind in day.slot_kinds() {
        let label = kind.to_string();
        match day.slot(kind) {
            Some(meal) => {
                let mut tags = Vec::new();
                if let Some(source) = meal.recycled_from {
                    tags.push(format!("[Recycled from {}]", WEEKDAYS.get(source).copied().unwrap_or("?")));
                }
                if meal.fine_tuned {
                    tags.push("[Fine-tuned]".to_string());
                }
                let tags_str = if tags.is_empty() {
                    String::new()
                } else {
                    format!("  {}", tags.join(" "))
                };

                println!(
                    "  {:<10} {:<width$}  x{:.2} {:<17} {}{}",
                    label,
                    meal.meal_name,
                    meal.scale,
                    format!("({})", meal.portion_label),
                    meal.macros,
                    tags_str,
                    width = name_width
                );
            }
            None => println!("  {:<10} (unfilled)", label),
        }
    }

    println!("  Totals:  {}", day.totals);
    println!("  Targets: {}", day.targets);
    println!(
        "  Accuracy: {:.1}% (kcal {:.0}%, protein {:.0}%, carbs {:.0}%, fat {:.0}%)",
        day.accuracy.total,
        day.accuracy.kcal,
        day.accuracy.protein,
        day.accuracy.carbs,
        day.accuracy.fat
    );
}

/// Display library meals with their resolved category and its source.
pub fn display_classification(rows: &[(&Meal, CategorySource)]) {
    if rows.is_empty() {
        println!("Meal library: (none)");
        return;
    }

    println!();
    println!("=== Meal Library ({} meals) ===", rows.len());
    println!();

    let name_width = rows.iter().map(|(m, _)| m.name.len()).max().unwrap_or(10);

    for (meal, source) in rows {
        let category = source
            .category()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "any".to_string());
        println!(
            "  {:<width$}  {:<9} ({:<8})  {}",
            meal.name,
            category,
            source.describe(),
            meal.macros,
            width = name_width
        );
    }

    println!();
}
