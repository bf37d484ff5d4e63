//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sugarmummy_core` linkage.
//! - Exercise logging and the model façade on a fixed sample so output is
//!   deterministic.

use std::path::PathBuf;
use sugarmummy_core::model::utc_date;
use sugarmummy_core::{
    average_records, default_log_level, evaluate_achievements, food_type_in, init_logging,
    recommend_mixed_meal, AveragePeriod, Food, FoodSortKey, FoodType, ModelManager,
    Nutrition, Record, RecordType,
};

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const LOG_DIR_NAME: &str = "sugarmummy-logs";

fn main() {
    println!("sugarmummy_core ping={}", sugarmummy_core::ping());
    println!("sugarmummy_core version={}", sugarmummy_core::core_version());

    let log_dir = default_log_dir();
    match init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        Ok(()) => println!("logging dir={}", log_dir.display()),
        // The sample still runs without log files.
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    match run_sample() {
        Ok(lines) => lines.iter().for_each(|line| println!("{line}")),
        Err(err) => {
            eprintln!("sample model failed: {err}");
            std::process::exit(1);
        }
    }
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR_NAME)
}

fn run_sample() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut model = ModelManager::new();

    for (name, food_type, gi) in [
        ("broccoli", FoodType::NonStarchyVegetable, 15.0),
        ("sweet potato", FoodType::StarchyVegetable, 63.0),
        ("brown rice", FoodType::StarchyVegetable, 50.0),
        ("apple", FoodType::Fruit, 36.0),
        ("tofu", FoodType::Protein, 15.0),
    ] {
        let nutrition = Nutrition {
            gi,
            ..Nutrition::default()
        };
        model.add_food(Food::new(name, food_type, nutrition)?)?;
    }
    model.update_filtered_food_list(food_type_in(&[
        FoodType::NonStarchyVegetable,
        FoodType::Fruit,
    ]));

    let mut last_at = 0;
    for (at, value) in [
        (8 * HOUR_MS, 5.2),
        (DAY_MS + 8 * HOUR_MS, 6.4),
        (DAY_MS + 19 * HOUR_MS, 7.0),
    ] {
        model.add_record(Record::blood_sugar(at, value)?)?;
        last_at = at;
    }

    let mut lines = vec![format!(
        "foods total={} visible={}",
        model.food_list().len(),
        model.filtered_food_list().count()
    )];

    let meal = recommend_mixed_meal(model.food_list(), Some(FoodSortKey::Gi), false);
    let meal_names: Vec<_> = meal.iter().map(Food::name).collect();
    lines.push(format!("mixed_meal={}", meal_names.join(",")));

    let points = average_records(
        model.record_list(),
        RecordType::BloodSugar,
        AveragePeriod::Daily,
        7,
    )?;
    lines.extend(points.iter().map(|point| {
        format!(
            "blood_sugar day={} average={:.2} samples={}",
            point.period_start, point.average, point.sample_count
        )
    }));

    let as_of = utc_date(last_at).ok_or("sample timestamp out of range")?;
    lines.extend(
        evaluate_achievements(model.record_list(), as_of)
            .iter()
            .map(|achievement| {
                format!(
                    "achievement type={} streak_days={} level={}",
                    achievement.record_type.as_str(),
                    achievement.streak_days,
                    achievement.level.map_or("none", |level| level.as_str())
                )
            }),
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::run_sample;
    use sugarmummy_core::{init_logging, logging_status};

    #[test]
    fn sample_runs_with_logging_initialized() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log_dir = dir.path().join("logs");
        init_logging("debug", log_dir.to_str().expect("utf-8 temp dir"))
            .expect("logging should start");

        let lines = run_sample().expect("sample should run");

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "debug");
        assert_eq!(active_dir, log_dir);
        assert!(log_dir.is_dir());
        assert_eq!(
            lines,
            vec![
                "foods total=5 visible=2",
                "mixed_meal=broccoli,brown rice,apple,tofu",
                "blood_sugar day=1970-01-01 average=5.20 samples=1",
                "blood_sugar day=1970-01-02 average=6.70 samples=2",
                "achievement type=blood_sugar streak_days=2 level=none",
                "achievement type=bmi streak_days=0 level=none",
            ]
        );
    }
}
