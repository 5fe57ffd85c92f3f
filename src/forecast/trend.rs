//! Linear earnings trend estimation.
//!
//! Fits an ordinary least-squares line to monthly earnings totals indexed
//! by their chronological position, and reports the goodness of fit. All
//! arithmetic stays in `Decimal`; the closed-form simple-regression
//! formulas need no square root.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TrendDirection;

use super::monthly::MonthlyAggregate;

/// Slope magnitude below which the trend counts as stable (currency
/// minor units per month).
const DIRECTION_EPSILON: Decimal = Decimal::ONE;

/// A fitted linear trend over monthly earnings.
///
/// `r_squared = 0` means "unusable, high uncertainty", not an error:
/// histories with fewer than two distinct months produce a flat
/// zero-confidence estimate instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEstimate {
    /// Earnings change per month (regression slope).
    pub slope: Decimal,
    /// Fitted earnings at month index 0 (regression intercept).
    pub intercept: Decimal,
    /// Goodness of fit in `[0, 1]`, clamped.
    pub r_squared: Decimal,
}

impl TrendEstimate {
    /// A flat estimate with zero confidence.
    pub fn flat() -> Self {
        Self {
            slope: Decimal::ZERO,
            intercept: Decimal::ZERO,
            r_squared: Decimal::ZERO,
        }
    }

    /// Predicts earnings for the given month index.
    ///
    /// Index `n` (one past the last fitted month) is the next-month
    /// prediction. The raw fitted value is returned, which can be negative
    /// for a falling trend; callers projecting annual totals floor it at
    /// zero.
    pub fn predict(&self, month_index: usize) -> Decimal {
        self.intercept + self.slope * Decimal::from(month_index as u64)
    }

    /// Classifies the slope direction.
    pub fn direction(&self) -> TrendDirection {
        if self.slope > DIRECTION_EPSILON {
            TrendDirection::Increasing
        } else if self.slope < -DIRECTION_EPSILON {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// Fits an OLS line to the aggregates, indexed `0..n-1` chronologically.
///
/// # Edge cases
///
/// - Fewer than 2 aggregates: returns [`TrendEstimate::flat`].
/// - A constant series (`SS_tot = 0`): the mean predicts perfectly and
///   `r_squared` is 1.
/// - `r_squared` is clamped to `[0, 1]` so downstream confidence math
///   never sees an out-of-range fit.
///
/// # Example
///
/// ```
/// use forecast_engine::forecast::{MonthlyAggregate, estimate_trend};
/// use rust_decimal::Decimal;
///
/// let aggregates: Vec<MonthlyAggregate> = [10_000, 12_000, 14_000]
///     .iter()
///     .enumerate()
///     .map(|(i, total)| MonthlyAggregate {
///         year: 2025,
///         month: i as u32 + 1,
///         total_earnings: Decimal::new(*total, 0),
///     })
///     .collect();
///
/// let trend = estimate_trend(&aggregates);
/// assert_eq!(trend.slope, Decimal::new(2000, 0));
/// assert_eq!(trend.intercept, Decimal::new(10_000, 0));
/// assert_eq!(trend.r_squared, Decimal::ONE);
/// ```
pub fn estimate_trend(aggregates: &[MonthlyAggregate]) -> TrendEstimate {
    let n = aggregates.len();
    if n < 2 {
        return TrendEstimate::flat();
    }

    let count = Decimal::from(n as u64);
    let mean_x = Decimal::from((n - 1) as u64) / Decimal::TWO;
    let mean_y = aggregates
        .iter()
        .fold(Decimal::ZERO, |sum, a| sum + a.total_earnings)
        / count;

    let mut sxy = Decimal::ZERO;
    let mut sxx = Decimal::ZERO;
    for (index, aggregate) in aggregates.iter().enumerate() {
        let dx = Decimal::from(index as u64) - mean_x;
        let dy = aggregate.total_earnings - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
    }

    // sxx > 0 whenever n >= 2 since the indices are distinct.
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_tot = Decimal::ZERO;
    let mut ss_res = Decimal::ZERO;
    for (index, aggregate) in aggregates.iter().enumerate() {
        let fitted = intercept + slope * Decimal::from(index as u64);
        let dy = aggregate.total_earnings - mean_y;
        let residual = aggregate.total_earnings - fitted;
        ss_tot += dy * dy;
        ss_res += residual * residual;
    }

    let r_squared = if ss_tot.is_zero() {
        // Constant series: the mean is a perfect predictor.
        Decimal::ONE
    } else {
        (Decimal::ONE - ss_res / ss_tot)
            .clamp(Decimal::ZERO, Decimal::ONE)
    };

    TrendEstimate {
        slope,
        intercept,
        r_squared,
    }
}
