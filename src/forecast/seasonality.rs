//! Seasonality analysis over calendar months.
//!
//! Computes the average earnings for each of-year calendar month across
//! all years present in the history and flags months that deviate strongly
//! from the yearly mean.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// A month counts as a peak above this multiple of the overall mean.
const PEAK_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1); // 1.2

/// A month counts as a low below this multiple of the overall mean.
const LOW_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1); // 0.8

/// Seasonality exists above this strength (stddev over mean).
const STRENGTH_THRESHOLD: f64 = 0.2;

/// Per-calendar-month earnings profile with deviation flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityProfile {
    /// Average earnings per calendar month (index 0 = January). Months
    /// absent from the history average to zero.
    pub monthly_averages: Vec<Decimal>,
    /// Months (1-12) whose average exceeds 1.2x the overall mean.
    pub peak_months: Vec<u32>,
    /// Months (1-12) whose average falls below 0.8x the overall mean.
    pub low_months: Vec<u32>,
    /// Coefficient of variation across the 12 monthly averages.
    pub strength: f64,
    /// Whether the history shows material seasonality.
    pub has_seasonality: bool,
}

impl SeasonalityProfile {
    /// A profile for a history with no usable earnings.
    fn none() -> Self {
        Self {
            monthly_averages: vec![Decimal::ZERO; 12],
            peak_months: Vec::new(),
            low_months: Vec::new(),
            strength: 0.0,
            has_seasonality: false,
        }
    }

    /// Checks whether a calendar month (1-12) is a peak month.
    pub fn is_peak(&self, month: u32) -> bool {
        self.peak_months.contains(&month)
    }

    /// Checks whether a calendar month (1-12) is a low month.
    pub fn is_low(&self, month: u32) -> bool {
        self.low_months.contains(&month)
    }
}

/// Analyzes the per-calendar-month earnings distribution.
///
/// Each calendar month's average is taken over the `(year, month)` totals
/// present in the history for that month; the population mean and standard
/// deviation are then taken across the 12 averages. A zero overall mean
/// short-circuits to a no-seasonality profile so no division by zero can
/// occur.
pub fn analyze_seasonality(shifts: &[ShiftRecord]) -> SeasonalityProfile {
    // Total earnings per (year, month) bucket.
    let mut bucket_totals: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for shift in shifts {
        let key = (shift.date.year(), shift.date.month());
        *bucket_totals.entry(key).or_insert(Decimal::ZERO) += shift.total_earnings;
    }

    // Average the buckets for each calendar month across years.
    let mut monthly_averages = vec![Decimal::ZERO; 12];
    for month in 1..=12u32 {
        let buckets: Vec<Decimal> = bucket_totals
            .iter()
            .filter(|((_, m), _)| *m == month)
            .map(|(_, total)| *total)
            .collect();
        if !buckets.is_empty() {
            let sum = buckets.iter().fold(Decimal::ZERO, |acc, v| acc + v);
            monthly_averages[(month - 1) as usize] = sum / Decimal::from(buckets.len() as u64);
        }
    }

    let mean = monthly_averages
        .iter()
        .fold(Decimal::ZERO, |acc, v| acc + v)
        / Decimal::new(12, 0);
    if mean.is_zero() {
        return SeasonalityProfile::none();
    }

    let mut peak_months = Vec::new();
    let mut low_months = Vec::new();
    for (index, average) in monthly_averages.iter().enumerate() {
        let month = index as u32 + 1;
        if *average > mean * PEAK_FACTOR {
            peak_months.push(month);
        } else if *average < mean * LOW_FACTOR {
            low_months.push(month);
        }
    }

    // Population variance across the 12 averages; the square root is the
    // one place the profile leaves Decimal.
    let variance = monthly_averages
        .iter()
        .map(|average| {
            let deviation = *average - mean;
            deviation * deviation
        })
        .fold(Decimal::ZERO, |acc, v| acc + v)
        / Decimal::new(12, 0);
    let strength = variance.to_f64().unwrap_or(0.0).sqrt() / mean.to_f64().unwrap_or(1.0);

    SeasonalityProfile {
        monthly_averages,
        peak_months,
        low_months,
        strength,
        has_seasonality: strength > STRENGTH_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn shift(date_str: &str, earnings: i64) -> ShiftRecord {
        ShiftRecord {
            id: format!("shift_{}", date_str),
            date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
            work_source_id: "cafe".to_string(),
            hourly_rate: Decimal::new(1200, 0),
            worked_minutes: 300,
            total_earnings: Decimal::new(earnings, 0),
        }
    }

    /// SE-001: empty history short-circuits to no seasonality
    #[test]
    fn test_empty_history_has_no_seasonality() {
        let profile = analyze_seasonality(&[]);
        assert!(!profile.has_seasonality);
        assert!(profile.peak_months.is_empty());
        assert!(profile.low_months.is_empty());
        assert_eq!(profile.strength, 0.0);
    }

    /// SE-002: zero-earnings history short-circuits (mean = 0)
    #[test]
    fn test_zero_earnings_history_has_no_seasonality() {
        let shifts = vec![shift("2025-01-10", 0), shift("2025-02-10", 0)];
        let profile = analyze_seasonality(&shifts);
        assert!(!profile.has_seasonality);
        assert!(profile.peak_months.is_empty());
    }

    /// SE-003: a single busy month is flagged as a peak
    #[test]
    fn test_concentrated_earnings_flag_peak_month() {
        // All earnings in August; the other 11 months average zero.
        let shifts = vec![shift("2024-08-05", 60_000), shift("2024-08-19", 60_000)];
        let profile = analyze_seasonality(&shifts);

        assert!(profile.is_peak(8));
        assert!(!profile.is_peak(7));
        // Every other month sits at zero, below 0.8x the mean.
        assert_eq!(profile.low_months.len(), 11);
        assert!(profile.has_seasonality);
        assert!(profile.strength > STRENGTH_THRESHOLD);
    }

    #[test]
    fn test_averages_span_years() {
        // January appears in two years; its average is the mean of both.
        let shifts = vec![shift("2024-01-10", 10_000), shift("2025-01-10", 20_000)];
        let profile = analyze_seasonality(&shifts);
        assert_eq!(profile.monthly_averages[0], Decimal::new(15_000, 0));
    }

    #[test]
    fn test_uniform_earnings_have_no_peaks_or_lows() {
        let shifts: Vec<ShiftRecord> = (1..=12u32)
            .map(|month| shift(&format!("2024-{:02}-10", month), 30_000))
            .collect();
        let profile = analyze_seasonality(&shifts);

        assert!(profile.peak_months.is_empty());
        assert!(profile.low_months.is_empty());
        assert!(!profile.has_seasonality);
        assert_eq!(profile.strength, 0.0);
    }

    #[test]
    fn test_mild_variation_stays_below_threshold() {
        // 10% swings around the mean stay under the 0.2 strength bar.
        let shifts: Vec<ShiftRecord> = (1..=12u32)
            .map(|month| {
                let earnings = if month % 2 == 0 { 33_000 } else { 27_000 };
                shift(&format!("2024-{:02}-10", month), earnings)
            })
            .collect();
        let profile = analyze_seasonality(&shifts);
        assert!(!profile.has_seasonality);
    }
}
