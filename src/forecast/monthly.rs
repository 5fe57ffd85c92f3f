//! Monthly earnings aggregation.
//!
//! Aggregates are derived fresh on every forecast call; nothing here is
//! cached or persisted.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// Total earnings for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// The sum of shift earnings in this month.
    pub total_earnings: Decimal,
}

/// Aggregates shift records into monthly earnings totals.
///
/// The result is ordered chronologically and contains only months that
/// actually have shifts; the trend estimator indexes months by their
/// position in this sequence.
///
/// # Example
///
/// ```
/// use forecast_engine::forecast::aggregate_by_month;
/// use forecast_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shifts = vec![
///     ShiftRecord {
///         id: "a".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///         work_source_id: "cafe".to_string(),
///         hourly_rate: Decimal::new(1200, 0),
///         worked_minutes: 300,
///         total_earnings: Decimal::new(6000, 0),
///     },
///     ShiftRecord {
///         id: "b".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 3, 24).unwrap(),
///         work_source_id: "cafe".to_string(),
///         hourly_rate: Decimal::new(1200, 0),
///         worked_minutes: 300,
///         total_earnings: Decimal::new(6000, 0),
///     },
/// ];
///
/// let aggregates = aggregate_by_month(&shifts);
/// assert_eq!(aggregates.len(), 1);
/// assert_eq!(aggregates[0].total_earnings, Decimal::new(12000, 0));
/// ```
pub fn aggregate_by_month(shifts: &[ShiftRecord]) -> Vec<MonthlyAggregate> {
    let mut totals: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

    for shift in shifts {
        let key = (shift.date.year(), shift.date.month());
        *totals.entry(key).or_insert(Decimal::ZERO) += shift.total_earnings;
    }

    totals
        .into_iter()
        .map(|((year, month), total_earnings)| MonthlyAggregate {
            year,
            month,
            total_earnings,
        })
        .collect()
}
