//! Record averaging per calendar period.
//!
//! # Responsibility
//! - Bucket biometric records of one type by UTC day, ISO week or month.
//! - Return the most recent buckets with their mean values.
//!
//! # Invariants
//! - Output buckets are ascending by `period_start` and contain at least one
//!   sample each.
//! - Weeks start on Monday.

use crate::model::record::{Record, RecordType};
use crate::model::utc_date;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AveragePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl AveragePeriod {
    /// First day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => Some(date),
            Self::Weekly => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset))
            }
            Self::Monthly => date.with_day(1),
        }
    }
}

/// Mean value of one period bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragePoint {
    pub period_start: NaiveDate,
    pub average: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AverageError {
    /// Requested bucket count is zero.
    InvalidCount,
}

impl Display for AverageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCount => write!(f, "average count must be a positive integer"),
        }
    }
}

impl Error for AverageError {}

/// Averages records of `record_type` and returns the latest `count` buckets.
///
/// Blood sugar averages concentration; BMI averages the derived index.
pub fn average_records<'a, I>(
    records: I,
    record_type: RecordType,
    period: AveragePeriod,
    count: usize,
) -> Result<Vec<AveragePoint>, AverageError>
where
    I: IntoIterator<Item = &'a Record>,
{
    if count == 0 {
        return Err(AverageError::InvalidCount);
    }

    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in records
        .into_iter()
        .filter(|record| record.record_type() == record_type)
    {
        let Some(start) = utc_date(record.date_time_ms()).and_then(|d| period.bucket_start(d))
        else {
            continue;
        };
        let bucket = buckets.entry(start).or_insert((0.0, 0));
        bucket.0 += record.primary_value();
        bucket.1 += 1;
    }

    let mut points = buckets
        .into_iter()
        .rev()
        .take(count)
        .map(|(period_start, (sum, samples))| AveragePoint {
            period_start,
            average: sum / samples as f64,
            sample_count: samples,
        })
        .collect::<Vec<_>>();
    points.reverse();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::{average_records, AverageError, AveragePeriod};
    use crate::model::record::{Record, RecordType};
    use chrono::NaiveDate;

    const DAY_MS: i64 = 86_400_000;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        // 1970-01-01 was a Thursday.
        assert_eq!(
            AveragePeriod::Weekly.bucket_start(date(1970, 1, 1)),
            Some(date(1969, 12, 29))
        );
        assert_eq!(
            AveragePeriod::Monthly.bucket_start(date(1970, 3, 17)),
            Some(date(1970, 3, 1))
        );
    }

    #[test]
    fn daily_average_keeps_latest_buckets_ascending() {
        let records = vec![
            Record::blood_sugar(0, 4.0).expect("valid"),
            Record::blood_sugar(3_600_000, 6.0).expect("valid"),
            Record::blood_sugar(DAY_MS, 7.0).expect("valid"),
            Record::blood_sugar(2 * DAY_MS, 5.0).expect("valid"),
            Record::bmi(2 * DAY_MS, 1.8, 70.0).expect("valid"),
        ];

        let points = average_records(&records, RecordType::BloodSugar, AveragePeriod::Daily, 2)
            .expect("average");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].period_start, date(1970, 1, 2));
        assert_eq!(points[0].average, 7.0);
        assert_eq!(points[1].period_start, date(1970, 1, 3));

        let all = average_records(&records, RecordType::BloodSugar, AveragePeriod::Daily, 10)
            .expect("average");
        assert_eq!(all[0].average, 5.0);
        assert_eq!(all[0].sample_count, 2);
    }

    #[test]
    fn weekly_and_monthly_buckets_split_on_period_boundaries() {
        // Thu 01-01, Sun 01-04, Mon 01-05, Mon 02-02.
        let records = vec![
            Record::blood_sugar(0, 4.0).expect("valid"),
            Record::blood_sugar(3 * DAY_MS, 6.0).expect("valid"),
            Record::blood_sugar(4 * DAY_MS, 10.0).expect("valid"),
            Record::blood_sugar(32 * DAY_MS, 8.0).expect("valid"),
        ];

        let weekly = average_records(&records, RecordType::BloodSugar, AveragePeriod::Weekly, 10)
            .expect("weekly average");
        let summary: Vec<_> = weekly
            .iter()
            .map(|point| (point.period_start, point.average, point.sample_count))
            .collect();
        assert_eq!(
            summary,
            vec![
                (date(1969, 12, 29), 5.0, 2),
                (date(1970, 1, 5), 10.0, 1),
                (date(1970, 2, 2), 8.0, 1),
            ]
        );

        let monthly =
            average_records(&records, RecordType::BloodSugar, AveragePeriod::Monthly, 10)
                .expect("monthly average");
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period_start, date(1970, 1, 1));
        assert_eq!(monthly[0].sample_count, 3);
        assert!((monthly[0].average - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(monthly[1].period_start, date(1970, 2, 1));
        assert_eq!(monthly[1].average, 8.0);
        assert_eq!(monthly[1].sample_count, 1);

        let latest_month =
            average_records(&records, RecordType::BloodSugar, AveragePeriod::Monthly, 1)
                .expect("monthly average");
        assert_eq!(latest_month[0].period_start, date(1970, 2, 1));
    }

    #[test]
    fn rejects_zero_count() {
        let err = average_records(&[], RecordType::Bmi, AveragePeriod::Monthly, 0)
            .expect_err("zero count");
        assert_eq!(err, AverageError::InvalidCount);
    }
}
