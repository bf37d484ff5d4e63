//! Entity value types tracked by the health model.
//!
//! # Responsibility
//! - Define immutable value objects for foods, biometric records, the user
//!   bio, calendar entries and legacy contacts.
//! - Define each kind's same-entity rule (weak identity) and field
//!   validation.
//!
//! # Invariants
//! - Values are validated on construction and on deserialization.
//! - Timestamps are Unix epoch milliseconds, interpreted as UTC.

use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod calendar;
pub mod food;
pub mod person;
pub mod record;
pub mod user;

/// Field-level validation failure for entity construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text field is empty after trim.
    BlankField(&'static str),
    /// Text field exceeds its character limit.
    TooLong { field: &'static str, max_chars: usize },
    /// Text field does not match its expected format.
    InvalidFormat { field: &'static str, value: String },
    /// Numeric field is outside the accepted range.
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
    /// Timestamp cannot be represented as a calendar date.
    InvalidTimestamp { field: &'static str, value: i64 },
    /// Event end precedes its start.
    InvalidEventWindow { start: i64, end: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max_chars } => {
                write!(f, "{field} must be at most {max_chars} characters")
            }
            Self::InvalidFormat { field, value } => {
                write!(f, "{field} has invalid format: `{value}`")
            }
            Self::OutOfRange { field, expected } => write!(f, "{field} must be {expected}"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "{field} is not a valid timestamp: {value}")
            }
            Self::InvalidEventWindow { start, end } => {
                write!(f, "event end ({end}) must be >= event start ({start})")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ValidationError::OutOfRange {
        field,
        expected: "a finite non-negative number",
    })
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ValidationError::OutOfRange {
        field,
        expected: "a finite positive number",
    })
}

/// UTC calendar date of an epoch-millisecond timestamp.
pub fn utc_date(epoch_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map(|dt| dt.date_naive())
}

pub(crate) fn require_timestamp(field: &'static str, value: i64) -> Result<(), ValidationError> {
    match utc_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidTimestamp { field, value }),
    }
}

/// Whole-word, case-insensitive keyword match used by the find filters.
pub(crate) fn contains_any_word(text: &str, keywords: &[String]) -> bool {
    text.split_whitespace().any(|word| {
        keywords
            .iter()
            .any(|keyword| word.eq_ignore_ascii_case(keyword))
    })
}

pub(crate) fn normalize_keywords(keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{contains_any_word, normalize_keywords, require_text, utc_date, ValidationError};
    use chrono::NaiveDate;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("name", "  rice ").expect("trimmed"), "rice");
        assert_eq!(
            require_text("name", "   ").expect_err("blank must fail"),
            ValidationError::BlankField("name")
        );
    }

    #[test]
    fn keyword_match_is_whole_word_and_case_insensitive() {
        let keywords = normalize_keywords(&["RICE", "  ", "bean"]);
        assert_eq!(keywords, vec!["RICE".to_string(), "bean".to_string()]);
        assert!(contains_any_word("brown rice", &keywords));
        assert!(!contains_any_word("licorice", &keywords));
        assert!(!contains_any_word("beans", &keywords));
    }

    #[test]
    fn utc_date_maps_epoch_millis() {
        assert_eq!(
            utc_date(86_400_000 + 1),
            NaiveDate::from_ymd_opt(1970, 1, 2)
        );
        assert_eq!(utc_date(-1), NaiveDate::from_ymd_opt(1969, 12, 31));
    }
}
