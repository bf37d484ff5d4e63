//! Core domain logic for SugarMummy.
//! This crate is the single source of truth for entity list invariants.

pub mod collection;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod service;

pub use collection::filter::{EntityFilter, FilteredList, FilteredView};
pub use collection::observer::{ListChange, SubscriptionId};
pub use collection::unique_list::{ListError, ListResult, SameEntity, UniqueEntityList};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{
    calendar_description_contains_keywords, calendar_entry_in_month, calendar_entry_on,
    CalendarEntry, CalendarEntryKind, Repetition,
};
pub use model::food::{food_name_contains_keywords, food_type_in, Food, FoodType, Nutrition};
pub use model::person::{person_name_contains_keywords, Person};
pub use model::record::{record_type_is, record_within, Measurement, Record, RecordType};
pub use model::user::User;
pub use model::ValidationError;
pub use prefs::{DataFile, GuiSettings, PrefsError, UserPrefs};
pub use service::achievement_service::{
    evaluate_achievements, in_range_streak, Achievement, AchievementLevel,
    BLOOD_SUGAR_TARGET_MMOL_L, BMI_TARGET,
};
pub use service::average_service::{average_records, AverageError, AveragePeriod, AveragePoint};
pub use service::model_manager::ModelManager;
pub use service::recommendation_service::{
    recommend_foods, recommend_mixed_meal, FoodSortKey, MIXED_MEAL_GROUPS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
