//! Streak achievements derived from biometric records.
//!
//! # Responsibility
//! - Count consecutive UTC days whose daily average stays in a healthy
//!   range, per record type.
//! - Map streak lengths to bronze/silver/gold levels.
//!
//! # Invariants
//! - A streak must end on the evaluation day; a day without readings breaks
//!   it.
//! - Results are derived on demand and never stored in the model.

use crate::model::record::{Record, RecordType};
use crate::service::average_service::{average_records, AveragePeriod};
use chrono::{Days, NaiveDate};

/// Daily mean blood sugar range in mmol/L, inclusive.
pub const BLOOD_SUGAR_TARGET_MMOL_L: (f64, f64) = (4.0, 7.8);
/// Healthy BMI range, inclusive.
pub const BMI_TARGET: (f64, f64) = (18.5, 24.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AchievementLevel {
    Bronze,
    Silver,
    Gold,
}

impl AchievementLevel {
    /// Streak days needed for each level, lowest first.
    pub const THRESHOLDS: [(AchievementLevel, usize); 3] = [
        (AchievementLevel::Bronze, 3),
        (AchievementLevel::Silver, 7),
        (AchievementLevel::Gold, 14),
    ];

    pub fn for_streak(days: usize) -> Option<Self> {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(_, needed)| days >= *needed)
            .map(|(level, _)| *level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }
}

/// Streak status of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub record_type: RecordType,
    pub streak_days: usize,
    pub level: Option<AchievementLevel>,
}

/// Evaluates blood sugar and BMI streaks ending on `as_of`.
pub fn evaluate_achievements(records: &[Record], as_of: NaiveDate) -> Vec<Achievement> {
    [
        (RecordType::BloodSugar, BLOOD_SUGAR_TARGET_MMOL_L),
        (RecordType::Bmi, BMI_TARGET),
    ]
    .into_iter()
    .map(|(record_type, target)| {
        let streak_days = in_range_streak(records, record_type, target, as_of);
        Achievement {
            record_type,
            streak_days,
            level: AchievementLevel::for_streak(streak_days),
        }
    })
    .collect()
}

/// Consecutive days ending on `as_of` whose daily average lies within
/// `(low, high)`, bounds inclusive.
pub fn in_range_streak(
    records: &[Record],
    record_type: RecordType,
    (low, high): (f64, f64),
    as_of: NaiveDate,
) -> usize {
    let Ok(daily) = average_records(records, record_type, AveragePeriod::Daily, usize::MAX) else {
        return 0;
    };

    let mut expected = Some(as_of);
    let mut streak = 0;
    for point in daily
        .iter()
        .rev()
        .skip_while(|point| point.period_start > as_of)
    {
        if Some(point.period_start) != expected || !(low..=high).contains(&point.average) {
            break;
        }
        streak += 1;
        expected = point.period_start.checked_sub_days(Days::new(1));
    }
    streak
}
