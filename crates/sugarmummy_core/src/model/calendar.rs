//! Calendar entry domain model.
//!
//! # Responsibility
//! - Define reminders (optionally repeating) and events (point or range).
//! - Answer day/month occurrence queries for the calendar views.
//!
//! # Invariants
//! - Two entries are the same entity when they share `description` and start
//!   instant.
//! - Event `end_ms`, when set, is not earlier than `start_ms`.
//! - Occurrence checks use UTC calendar dates.

use crate::collection::filter::EntityFilter;
use crate::collection::unique_list::SameEntity;
use crate::model::{
    contains_any_word, normalize_keywords, require_text, require_timestamp, utc_date,
    ValidationError,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Repetition rule of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repetition {
    Once,
    Daily,
    Weekly,
}

/// Reminder or event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarEntryKind {
    Reminder { at_ms: i64, repetition: Repetition },
    Event { start_ms: i64, end_ms: Option<i64> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarEntryData")]
pub struct CalendarEntry {
    description: String,
    kind: CalendarEntryKind,
}

#[derive(Deserialize)]
struct CalendarEntryData {
    description: String,
    kind: CalendarEntryKind,
}

impl TryFrom<CalendarEntryData> for CalendarEntry {
    type Error = ValidationError;

    fn try_from(data: CalendarEntryData) -> Result<Self, Self::Error> {
        CalendarEntry::new(data.description, data.kind)
    }
}

impl CalendarEntry {
    pub fn new(
        description: impl AsRef<str>,
        kind: CalendarEntryKind,
    ) -> Result<Self, ValidationError> {
        let description = require_text("description", description.as_ref())?;
        match kind {
            CalendarEntryKind::Reminder { at_ms, .. } => {
                require_timestamp("reminder time", at_ms)?;
            }
            CalendarEntryKind::Event { start_ms, end_ms } => {
                require_timestamp("event start", start_ms)?;
                if let Some(end) = end_ms {
                    require_timestamp("event end", end)?;
                    if end < start_ms {
                        return Err(ValidationError::InvalidEventWindow {
                            start: start_ms,
                            end,
                        });
                    }
                }
            }
        }
        Ok(Self { description, kind })
    }

    pub fn reminder(
        description: impl AsRef<str>,
        at_ms: i64,
        repetition: Repetition,
    ) -> Result<Self, ValidationError> {
        Self::new(description, CalendarEntryKind::Reminder { at_ms, repetition })
    }

    pub fn event(
        description: impl AsRef<str>,
        start_ms: i64,
        end_ms: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Self::new(description, CalendarEntryKind::Event { start_ms, end_ms })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> CalendarEntryKind {
        self.kind
    }

    pub fn is_reminder(&self) -> bool {
        matches!(self.kind, CalendarEntryKind::Reminder { .. })
    }

    /// Start instant: reminder time or event start.
    pub fn start_ms(&self) -> i64 {
        match self.kind {
            CalendarEntryKind::Reminder { at_ms, .. } => at_ms,
            CalendarEntryKind::Event { start_ms, .. } => start_ms,
        }
    }

    /// Returns whether this entry falls on `day`, expanding repetitions.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match self.kind {
            CalendarEntryKind::Reminder { at_ms, repetition } => {
                let Some(first) = utc_date(at_ms) else {
                    return false;
                };
                if day < first {
                    return false;
                }
                match repetition {
                    Repetition::Once => day == first,
                    Repetition::Daily => true,
                    Repetition::Weekly => (day - first).num_days() % 7 == 0,
                }
            }
            CalendarEntryKind::Event { start_ms, end_ms } => {
                let (Some(first), Some(last)) =
                    (utc_date(start_ms), utc_date(end_ms.unwrap_or(start_ms)))
                else {
                    return false;
                };
                first <= day && day <= last
            }
        }
    }

    /// Returns whether this entry occurs on any day of `year`-`month`.
    pub fn occurs_in_month(&self, year: i32, month: u32) -> bool {
        let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return false;
        };
        first_day
            .iter_days()
            .take_while(|day| day.month() == month)
            .any(|day| self.occurs_on(day))
    }
}

impl SameEntity for CalendarEntry {
    const KIND: &'static str = "calendar entry";

    fn is_same_entity(&self, other: &Self) -> bool {
        self.description == other.description && self.start_ms() == other.start_ms()
    }
}

pub fn calendar_entry_on(day: NaiveDate) -> EntityFilter<CalendarEntry> {
    EntityFilter::new(format!("calendar_on={day}"), move |entry: &CalendarEntry| {
        entry.occurs_on(day)
    })
}

pub fn calendar_entry_in_month(year: i32, month: u32) -> EntityFilter<CalendarEntry> {
    EntityFilter::new(
        format!("calendar_month={year}-{month:02}"),
        move |entry: &CalendarEntry| entry.occurs_in_month(year, month),
    )
}

pub fn calendar_description_contains_keywords(keywords: &[&str]) -> EntityFilter<CalendarEntry> {
    let keywords = normalize_keywords(keywords);
    EntityFilter::new("calendar_keywords", move |entry: &CalendarEntry| {
        contains_any_word(entry.description(), &keywords)
    })
}
