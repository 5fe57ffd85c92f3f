//! Suggested shift and recommendation models.
//!
//! This module contains the candidate-shift type produced by the suggestion
//! generator, the recommendation type produced by the schedule optimizer,
//! and the small vocabulary enums shared across forecast outputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// Scheduling priority of a suggested shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Lowest scheduling weight.
    Low,
    /// Default scheduling weight.
    Medium,
    /// Highest scheduling weight; donors classified for focus.
    High,
}

/// A machine-readable reason a shift was suggested.
///
/// Tags are ordered by the suggestion generator: the strongest reason
/// comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    /// The donor source pays well above the market baseline.
    HighRate,
    /// The donor source has a regular shift history.
    ConsistentHistory,
    /// The donor source's pay rate has been growing.
    GrowthTrend,
    /// The slot falls on a weekend with a longer available block.
    WeekendAvailability,
    /// The expected earnings for the slot are high in absolute terms.
    HighEarnings,
}

impl std::fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReasonTag::HighRate => "high hourly rate",
            ReasonTag::ConsistentHistory => "consistent shift history",
            ReasonTag::GrowthTrend => "growing pay rate",
            ReasonTag::WeekendAvailability => "weekend availability",
            ReasonTag::HighEarnings => "high expected earnings",
        };
        write!(f, "{}", label)
    }
}

/// A candidate future shift, proposed but not committed.
///
/// # Example
///
/// ```
/// use forecast_engine::models::{Priority, ReasonTag, SuggestedShift, TimeOfDay};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let candidate = SuggestedShift {
///     date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
///     start: TimeOfDay::from_hm(10, 0),
///     end: TimeOfDay::from_hm(16, 0),
///     work_source_id: "cafe".to_string(),
///     expected_earnings: Decimal::new(7200, 0),
///     priority: Priority::High,
///     rationale: vec![ReasonTag::HighRate, ReasonTag::WeekendAvailability],
/// };
/// assert_eq!(candidate.hours(), Decimal::new(60, 1)); // 6.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedShift {
    /// The proposed date.
    pub date: NaiveDate,
    /// The proposed start time.
    pub start: TimeOfDay,
    /// The proposed end time (at or before `start` means next day).
    pub end: TimeOfDay,
    /// The donor work source.
    pub work_source_id: String,
    /// The earnings expected from working this shift.
    pub expected_earnings: Decimal,
    /// The scheduling priority.
    pub priority: Priority,
    /// Ordered reasons this shift was suggested.
    pub rationale: Vec<ReasonTag>,
}

impl SuggestedShift {
    /// Returns the duration of the proposed shift in hours.
    pub fn hours(&self) -> Decimal {
        self.start.hours_until(self.end)
    }
}

/// The kind of schedule recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Projected earnings approach the threshold; work less.
    DecreaseHours,
    /// The schedule is heavy enough to erode work-life balance.
    ReduceWorkload,
    /// Headroom and balance both allow taking on more work.
    IncreaseCapacity,
    /// The current schedule is well calibrated.
    Maintain,
}

/// A rule-generated recommendation attached to an optimized schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The kind of recommendation.
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// A short description of the recommendation.
    pub message: String,
    /// The expected impact of following it.
    pub impact: String,
}

/// Direction of the fitted earnings trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Monthly earnings are rising.
    Increasing,
    /// Monthly earnings are falling.
    Decreasing,
    /// No material slope either way.
    Stable,
}

/// A factor that contributed to a forecast value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastFactor {
    /// The fitted trend slopes upward.
    UpwardTrend,
    /// The fitted trend slopes downward.
    DownwardTrend,
    /// The target month is a seasonal peak.
    SeasonalPeak,
    /// The target month is a seasonal low.
    SeasonalLow,
    /// Too little history for a usable fit; treat with high uncertainty.
    LimitedHistory,
}
