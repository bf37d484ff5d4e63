//! Biometric record domain model.
//!
//! # Responsibility
//! - Define timestamped blood sugar and BMI measurements.
//! - Provide ready-made filters for the record list.
//!
//! # Invariants
//! - Two records are the same entity when they share `date_time_ms` and
//!   `RecordType`; a blood sugar and a BMI reading may share a timestamp.
//! - Measurement values are finite and positive.

use crate::collection::filter::EntityFilter;
use crate::collection::unique_list::SameEntity;
use crate::model::{require_positive, require_timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Discriminant of a `Measurement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    BloodSugar,
    Bmi,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BloodSugar => "blood_sugar",
            Self::Bmi => "bmi",
        }
    }
}

/// Measured biometric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Measurement {
    /// Blood glucose concentration in mmol/L.
    BloodSugar { concentration_mmol_l: f64 },
    /// Height in metres and weight in kilograms.
    Bmi { height_m: f64, weight_kg: f64 },
}

impl Measurement {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::BloodSugar { .. } => RecordType::BloodSugar,
            Self::Bmi { .. } => RecordType::Bmi,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::BloodSugar {
                concentration_mmol_l,
            } => require_positive("concentration", concentration_mmol_l),
            Self::Bmi {
                height_m,
                weight_kg,
            } => {
                require_positive("height", height_m)?;
                require_positive("weight", weight_kg)
            }
        }
    }
}

/// One timestamped biometric reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordData")]
pub struct Record {
    date_time_ms: i64,
    measurement: Measurement,
}

#[derive(Deserialize)]
struct RecordData {
    date_time_ms: i64,
    measurement: Measurement,
}

impl TryFrom<RecordData> for Record {
    type Error = ValidationError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        Record::new(data.date_time_ms, data.measurement)
    }
}

impl Record {
    pub fn new(date_time_ms: i64, measurement: Measurement) -> Result<Self, ValidationError> {
        require_timestamp("record date_time", date_time_ms)?;
        measurement.validate()?;
        Ok(Self {
            date_time_ms,
            measurement,
        })
    }

    pub fn blood_sugar(
        date_time_ms: i64,
        concentration_mmol_l: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            date_time_ms,
            Measurement::BloodSugar {
                concentration_mmol_l,
            },
        )
    }

    pub fn bmi(date_time_ms: i64, height_m: f64, weight_kg: f64) -> Result<Self, ValidationError> {
        Self::new(
            date_time_ms,
            Measurement::Bmi {
                height_m,
                weight_kg,
            },
        )
    }

    pub fn date_time_ms(&self) -> i64 {
        self.date_time_ms
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn record_type(&self) -> RecordType {
        self.measurement.record_type()
    }

    /// Derived body mass index; `None` for blood sugar records.
    pub fn bmi_value(&self) -> Option<f64> {
        match self.measurement {
            Measurement::Bmi {
                height_m,
                weight_kg,
            } => Some(weight_kg / (height_m * height_m)),
            Measurement::BloodSugar { .. } => None,
        }
    }

    /// Value used for averaging: concentration or derived BMI.
    pub fn primary_value(&self) -> f64 {
        match self.measurement {
            Measurement::BloodSugar {
                concentration_mmol_l,
            } => concentration_mmol_l,
            Measurement::Bmi {
                height_m,
                weight_kg,
            } => weight_kg / (height_m * height_m),
        }
    }
}

impl SameEntity for Record {
    const KIND: &'static str = "record";

    fn is_same_entity(&self, other: &Self) -> bool {
        self.date_time_ms == other.date_time_ms && self.record_type() == other.record_type()
    }
}

pub fn record_type_is(record_type: RecordType) -> EntityFilter<Record> {
    EntityFilter::new(
        format!("record_type={}", record_type.as_str()),
        move |record: &Record| record.record_type() == record_type,
    )
}

/// Records taken in the half-open window `[start_ms, end_ms)`.
pub fn record_within(start_ms: i64, end_ms: i64) -> EntityFilter<Record> {
    EntityFilter::new("record_within", move |record: &Record| {
        (start_ms..end_ms).contains(&record.date_time_ms())
    })
}

#[cfg(test)]
mod tests {
    use super::{record_within, Record, RecordType};
    use crate::collection::unique_list::SameEntity;

    #[test]
    fn identity_is_timestamp_plus_type() {
        let sugar = Record::blood_sugar(1_000, 5.5).expect("valid record");
        let sugar_edit = Record::blood_sugar(1_000, 6.1).expect("valid record");
        let bmi = Record::bmi(1_000, 1.7, 60.0).expect("valid record");

        assert!(sugar.is_same_entity(&sugar_edit));
        assert!(!sugar.is_same_entity(&bmi));
        assert_eq!(bmi.record_type(), RecordType::Bmi);
    }

    #[test]
    fn derives_bmi() {
        let record = Record::bmi(0, 2.0, 80.0).expect("valid record");
        assert_eq!(record.bmi_value(), Some(20.0));
        assert_eq!(record.primary_value(), 20.0);
        let sugar = Record::blood_sugar(0, 4.2).expect("valid record");
        assert_eq!(sugar.bmi_value(), None);
    }

    #[test]
    fn rejects_non_positive_values_and_unrepresentable_time() {
        assert!(Record::blood_sugar(0, 0.0).is_err());
        assert!(Record::bmi(0, 1.7, f64::NAN).is_err());
        assert!(Record::blood_sugar(i64::MAX, 5.0).is_err());
    }

    #[test]
    fn window_filter_is_half_open() {
        let filter = record_within(100, 200);
        let at_start = Record::blood_sugar(100, 5.0).expect("valid record");
        let at_end = Record::blood_sugar(200, 5.0).expect("valid record");
        assert!(filter.matches(&at_start));
        assert!(!filter.matches(&at_end));
    }
}
