//! The forecasting facade.
//!
//! [`ForecastEngine`] is the single entry point external collaborators
//! invoke. It is an explicitly constructed, dependency-injected service:
//! the rule set and policy are handed to it once, every forecast input is
//! an argument, and every output is a returned value. The engine holds no
//! mutable state, reads no ambient state, and never writes back to the
//! shift history or work-source registry.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ConfigLoader, EnginePolicy, RegulatoryRuleSet};
use crate::error::EngineResult;
use crate::models::{
    ForecastFactor, PlanningWindow, ShiftRecord, SuggestedShift, TrendDirection, WorkSource,
};

use super::monthly::aggregate_by_month;
use super::optimizer::{
    OptimizationObjective, ScheduleConstraints, ScheduleOptimizationResult, optimize_schedule,
};
use super::risk::{RiskAssessment, RiskTier, assess_risk};
use super::seasonality::{SeasonalityProfile, analyze_seasonality};
use super::source_score::{WorkSourceScore, score_work_sources};
use super::suggestion::generate_suggestions;
use super::trend::estimate_trend;

/// Months of history at which yearly confidence is no longer damped.
const FULL_CONFIDENCE_MONTHS: u32 = 6;

/// Input to a forecast call: read-only snapshots plus the evaluation
/// context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// The raw shift history (a read-only snapshot).
    pub shifts: Vec<ShiftRecord>,
    /// The work-source registry (a read-only snapshot).
    pub work_sources: Vec<WorkSource>,
    /// The jurisdiction whose walls apply. Callers wanting a default
    /// jurisdiction must apply it before calling.
    pub jurisdiction: String,
    /// The evaluation date; the planning window is the following month
    /// and the regulatory year is this date's calendar year.
    pub as_of: NaiveDate,
    /// Scheduling constraints for the optimizer.
    #[serde(default)]
    pub constraints: ScheduleConstraints,
    /// The optimization objective.
    pub objective: OptimizationObjective,
}

/// The next-month earnings prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// Predicted earnings for the planning month. The raw fitted value is
    /// reported, which can be negative on a falling trend.
    pub value: Decimal,
    /// Goodness of fit of the underlying trend, in `[0, 1]`.
    pub confidence: Decimal,
    /// Direction of the fitted trend.
    pub direction: TrendDirection,
    /// Factors that contributed to the prediction.
    pub factors: Vec<ForecastFactor>,
}

/// The projected annual earnings with its risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyForecast {
    /// Projected earnings for the regulatory year (year-to-date plus the
    /// trend prediction over the remaining months, floored at zero per
    /// month).
    pub value: Decimal,
    /// Trend confidence damped by history depth, in `[0, 1]`.
    pub confidence: Decimal,
    /// The assessment against the jurisdiction's tax wall.
    pub risk: RiskAssessment,
    /// Short recommended actions for the projected tier.
    pub recommended_actions: Vec<String>,
}

/// The complete result of one forecast call.
///
/// `forecast_id` and `generated_at` identify the result for audit and are
/// the only fields that differ between two calls with identical input;
/// everything else is a pure function of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Unique identifier for this forecast.
    pub forecast_id: Uuid,
    /// When the forecast was generated.
    pub generated_at: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The jurisdiction the walls were taken from.
    pub jurisdiction: String,
    /// The evaluation date the forecast was computed for.
    pub as_of: NaiveDate,
    /// The next-month prediction.
    pub monthly: MonthlyForecast,
    /// The annual projection and its risk.
    pub yearly: YearlyForecast,
    /// The per-calendar-month seasonality profile.
    pub seasonality: SeasonalityProfile,
    /// Per-work-source scores in registry order.
    pub source_scores: Vec<WorkSourceScore>,
    /// Ranked candidate shifts for the planning month.
    pub suggestions: Vec<SuggestedShift>,
    /// The optimized schedule selected from the candidates.
    pub schedule: ScheduleOptimizationResult,
}

/// The forecasting service.
///
/// # Example
///
/// ```no_run
/// use forecast_engine::forecast::{ForecastEngine, ForecastRequest, OptimizationObjective};
/// use forecast_engine::forecast::ScheduleConstraints;
/// use chrono::NaiveDate;
///
/// let engine = ForecastEngine::from_config_dir("./config").unwrap();
/// let request = ForecastRequest {
///     shifts: vec![],
///     work_sources: vec![],
///     jurisdiction: "jp".to_string(),
///     as_of: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
///     constraints: ScheduleConstraints::default(),
///     objective: OptimizationObjective::MaximizeEarnings,
/// };
/// let result = engine.forecast(&request).unwrap();
/// println!("Projected annual: {}", result.yearly.value);
/// ```
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    rule_set: RegulatoryRuleSet,
    policy: EnginePolicy,
}

impl ForecastEngine {
    /// Creates an engine from an explicit rule set and policy.
    pub fn new(rule_set: RegulatoryRuleSet, policy: EnginePolicy) -> Self {
        Self { rule_set, policy }
    }

    /// Creates an engine by loading configuration from a YAML directory.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::error::EngineError`] from the loader.
    pub fn from_config_dir<P: AsRef<std::path::Path>>(path: P) -> EngineResult<Self> {
        let (rule_set, policy) = ConfigLoader::load(path)?.into_parts();
        Ok(Self::new(rule_set, policy))
    }

    /// Returns the engine's rule set.
    pub fn rule_set(&self) -> &RegulatoryRuleSet {
        &self.rule_set
    }

    /// Returns the engine's policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Runs the full forecasting pipeline over one input snapshot.
    ///
    /// Trend estimation, seasonality analysis and source scoring are
    /// independent of one another; suggestions, risk and the optimizer
    /// then run in dependency order. Degenerate data (no shifts, a single
    /// month, no eligible donors) produces a valid low-confidence result.
    ///
    /// # Errors
    ///
    /// - [`crate::error::EngineError::InvalidShiftRecord`] for corrupted
    ///   records.
    /// - [`crate::error::EngineError::UnknownJurisdiction`] /
    ///   [`crate::error::EngineError::ThresholdNotFound`] for rule-set
    ///   misses. These are never silently defaulted.
    pub fn forecast(&self, request: &ForecastRequest) -> EngineResult<ForecastResult> {
        info!(
            jurisdiction = %request.jurisdiction,
            as_of = %request.as_of,
            shifts = request.shifts.len(),
            work_sources = request.work_sources.len(),
            "Running forecast"
        );

        for shift in &request.shifts {
            shift.validate()?;
        }

        // The threshold lookup happens before any heavy computation so a
        // misconfigured jurisdiction fails fast.
        let thresholds = self
            .rule_set
            .thresholds_for(&request.jurisdiction, request.as_of)?;

        // Independent analyses over the same history.
        let aggregates = aggregate_by_month(&request.shifts);
        let trend = estimate_trend(&aggregates);
        let seasonality = analyze_seasonality(&request.shifts);
        let source_scores =
            score_work_sources(&request.shifts, &request.work_sources, &self.policy);
        debug!(
            months = aggregates.len(),
            r_squared = %trend.r_squared,
            "Trend fitted"
        );

        let window = PlanningWindow::following(request.as_of);
        let suggestions = generate_suggestions(&source_scores, window, &self.policy);
        debug!(candidates = suggestions.len(), "Suggestions generated");

        let year_to_date = year_to_date_earnings(&request.shifts, request.as_of);
        let next_month_prediction = trend.predict(aggregates.len());
        let remaining_months = Decimal::from(12 - request.as_of.month());
        let projected_annual =
            year_to_date + next_month_prediction.max(Decimal::ZERO) * remaining_months;

        let risk = assess_risk(projected_annual, thresholds.tax_annual);

        let schedule = optimize_schedule(
            &suggestions,
            &request.constraints,
            request.objective,
            window,
            &risk,
            year_to_date,
            &self.policy,
        );

        let monthly = MonthlyForecast {
            value: next_month_prediction,
            confidence: trend.r_squared,
            direction: trend.direction(),
            factors: forecast_factors(&trend, &seasonality, window),
        };

        let yearly = YearlyForecast {
            value: projected_annual,
            confidence: yearly_confidence(trend.r_squared, aggregates.len()),
            recommended_actions: recommended_actions(risk.tier),
            risk,
        };

        info!(
            tier = ?yearly.risk.tier,
            selected = schedule.selected_shifts.len(),
            "Forecast complete"
        );

        Ok(ForecastResult {
            forecast_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            jurisdiction: request.jurisdiction.clone(),
            as_of: request.as_of,
            monthly,
            yearly,
            seasonality,
            source_scores,
            suggestions,
            schedule,
        })
    }
}

/// Sum of earnings in the regulatory year of `as_of`, up to and including
/// `as_of`.
fn year_to_date_earnings(shifts: &[ShiftRecord], as_of: NaiveDate) -> Decimal {
    shifts
        .iter()
        .filter(|shift| shift.date.year() == as_of.year() && shift.date <= as_of)
        .fold(Decimal::ZERO, |sum, shift| sum + shift.total_earnings)
}

/// Trend confidence damped by history depth: below six months of data the
/// yearly projection is less trustworthy than the fit alone suggests.
fn yearly_confidence(r_squared: Decimal, month_count: usize) -> Decimal {
    let depth = Decimal::from(month_count.min(FULL_CONFIDENCE_MONTHS as usize) as u64)
        / Decimal::from(FULL_CONFIDENCE_MONTHS);
    r_squared * depth
}

fn forecast_factors(
    trend: &super::trend::TrendEstimate,
    seasonality: &SeasonalityProfile,
    window: PlanningWindow,
) -> Vec<ForecastFactor> {
    let mut factors = Vec::new();

    match trend.direction() {
        TrendDirection::Increasing => factors.push(ForecastFactor::UpwardTrend),
        TrendDirection::Decreasing => factors.push(ForecastFactor::DownwardTrend),
        TrendDirection::Stable => {}
    }
    if seasonality.is_peak(window.month) {
        factors.push(ForecastFactor::SeasonalPeak);
    }
    if seasonality.is_low(window.month) {
        factors.push(ForecastFactor::SeasonalLow);
    }
    if trend.r_squared.is_zero() {
        factors.push(ForecastFactor::LimitedHistory);
    }

    factors
}

fn recommended_actions(tier: RiskTier) -> Vec<String> {
    match tier {
        RiskTier::Safe => vec!["Capacity remains under the threshold".to_string()],
        RiskTier::Warning => vec![
            "Monitor monthly earnings closely".to_string(),
            "Prefer shorter shifts for the rest of the year".to_string(),
        ],
        RiskTier::Danger => vec![
            "Reduce scheduled hours until the projection clears the wall".to_string(),
            "Review upcoming shifts at the highest-rate sources first".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JurisdictionInfo, ThresholdRow};
    use crate::error::EngineError;

    fn test_rule_set() -> RegulatoryRuleSet {
        let mut rule_set = RegulatoryRuleSet::new();
        rule_set.add_jurisdiction(
            JurisdictionInfo {
                key: "jp".to_string(),
                name: "Japan".to_string(),
                currency: "JPY".to_string(),
                source_url: "https://www.nta.go.jp/".to_string(),
            },
            vec![
                ThresholdRow {
                    effective_from: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                    tax_annual: Decimal::new(1_030_000, 0),
                    social_insurance_annual: Decimal::new(1_300_000, 0),
                    social_monthly: Decimal::new(88_000, 0),
                },
                ThresholdRow {
                    effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    tax_annual: Decimal::new(1_230_000, 0),
                    social_insurance_annual: Decimal::new(1_300_000, 0),
                    social_monthly: Decimal::new(88_000, 0),
                },
            ],
        );
        rule_set
    }

    fn engine() -> ForecastEngine {
        ForecastEngine::new(test_rule_set(), EnginePolicy::default())
    }

    fn shift(id: &str, date_str: &str, rate: i64, minutes: i64) -> ShiftRecord {
        let hours = Decimal::new(minutes, 0) / Decimal::new(60, 0);
        ShiftRecord {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
            work_source_id: "cafe".to_string(),
            hourly_rate: Decimal::new(rate, 0),
            worked_minutes: minutes,
            total_earnings: Decimal::new(rate, 0) * hours,
        }
    }

    fn cafe() -> WorkSource {
        WorkSource {
            id: "cafe".to_string(),
            name: "Riverside Cafe".to_string(),
            default_hourly_rate: Decimal::new(1200, 0),
        }
    }

    fn request(shifts: Vec<ShiftRecord>) -> ForecastRequest {
        ForecastRequest {
            shifts,
            work_sources: vec![cafe()],
            jurisdiction: "jp".to_string(),
            as_of: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            constraints: ScheduleConstraints::default(),
            objective: OptimizationObjective::MaximizeEarnings,
        }
    }

    /// FC-001: empty history produces a valid low-confidence result
    #[test]
    fn test_empty_history_low_confidence_result() {
        let result = engine().forecast(&request(vec![])).unwrap();

        assert_eq!(result.monthly.value, Decimal::ZERO);
        assert_eq!(result.monthly.confidence, Decimal::ZERO);
        assert!(result.monthly.factors.contains(&ForecastFactor::LimitedHistory));
        assert_eq!(result.yearly.value, Decimal::ZERO);
        assert_eq!(result.yearly.risk.tier, RiskTier::Safe);
        assert!(result.suggestions.is_empty());
        assert!(result.schedule.selected_shifts.is_empty());
    }

    /// FC-002: unknown jurisdiction fails explicitly
    #[test]
    fn test_unknown_jurisdiction_fails() {
        let mut req = request(vec![]);
        req.jurisdiction = "atlantis".to_string();

        match engine().forecast(&req).unwrap_err() {
            EngineError::UnknownJurisdiction { key } => assert_eq!(key, "atlantis"),
            other => panic!("Expected UnknownJurisdiction, got {:?}", other),
        }
    }

    /// FC-003: invalid record fails before any computation
    #[test]
    fn test_invalid_record_fails() {
        let mut bad = shift("bad", "2025-02-10", 1200, 240);
        bad.worked_minutes = -10;

        let result = engine().forecast(&request(vec![bad]));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::InvalidShiftRecord { .. }
        ));
    }

    /// FC-004: the evaluation date picks the threshold row
    #[test]
    fn test_threshold_row_follows_as_of_date() {
        let mut req = request(vec![]);
        req.as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = engine().forecast(&req).unwrap();
        assert_eq!(result.yearly.risk.threshold, Decimal::new(1_030_000, 0));

        req.as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let result = engine().forecast(&req).unwrap();
        assert_eq!(result.yearly.risk.threshold, Decimal::new(1_230_000, 0));
    }

    /// FC-005: projection combines year-to-date with the trend
    #[test]
    fn test_projection_combines_ytd_and_trend() {
        // Jan..Apr 2025 at a steady 60,000/month (4 shifts x 10h x 1500).
        let mut shifts = Vec::new();
        for month in 1..=4u32 {
            for day in [3u32, 10, 17, 24] {
                shifts.push(shift(
                    &format!("s{}_{}", month, day),
                    &format!("2025-{:02}-{:02}", month, day),
                    1500,
                    600,
                ));
            }
        }
        let result = engine().forecast(&request(shifts)).unwrap();

        // 4 months x 4 shifts x 10h x 1500 = 240,000 year to date; a flat
        // trend predicts 60,000 for each of the 8 remaining months.
        assert_eq!(result.yearly.value, Decimal::new(720_000, 0));
        assert_eq!(result.monthly.value, Decimal::new(60_000, 0));
        assert_eq!(result.monthly.direction, TrendDirection::Stable);
        assert_eq!(result.yearly.risk.tier, RiskTier::Safe);
    }

    /// FC-006: schedule totals always agree with the selected shifts
    #[test]
    fn test_schedule_totals_invariant() {
        let shifts: Vec<ShiftRecord> = (1..=8u32)
            .map(|day| {
                shift(
                    &format!("s{}", day),
                    &format!("2025-03-{:02}", day),
                    1800,
                    300,
                )
            })
            .collect();
        let result = engine().forecast(&request(shifts)).unwrap();

        assert!(!result.suggestions.is_empty());
        let sum = result
            .schedule
            .selected_shifts
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc + s.expected_earnings);
        assert_eq!(result.schedule.total_earnings, sum);

        // Every selected shift is one of the generated candidates.
        for selected in &result.schedule.selected_shifts {
            assert!(result.suggestions.contains(selected));
        }
    }

    /// FC-007: identical input yields identical output modulo envelope
    #[test]
    fn test_idempotent_modulo_envelope() {
        let shifts: Vec<ShiftRecord> = (1..=6u32)
            .map(|day| {
                shift(
                    &format!("s{}", day),
                    &format!("2025-03-{:02}", day),
                    1500,
                    300,
                )
            })
            .collect();
        let req = request(shifts);

        let first = engine().forecast(&req).unwrap();
        let second = engine().forecast(&req).unwrap();

        assert_eq!(first.monthly, second.monthly);
        assert_eq!(first.yearly, second.yearly);
        assert_eq!(first.seasonality, second.seasonality);
        assert_eq!(first.source_scores, second.source_scores);
        assert_eq!(first.suggestions, second.suggestions);
        assert_eq!(first.schedule, second.schedule);
        assert_ne!(first.forecast_id, second.forecast_id);
    }

    /// FC-008: a falling trend reports its raw value but never deflates
    /// the annual projection below year-to-date
    #[test]
    fn test_falling_trend_floors_projection() {
        // Steeply falling months: 90,000 / 50,000 / 10,000. The fitted
        // next-month value is -30,000.
        let shifts = vec![
            shift("a", "2025-01-10", 1500, 3600), // 90,000
            shift("b", "2025-02-10", 1250, 2400), // 50,000
            shift("c", "2025-03-10", 1000, 600),  // 10,000
        ];
        let mut req = request(shifts);
        req.as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        let result = engine().forecast(&req).unwrap();
        assert_eq!(result.monthly.value, Decimal::new(-30_000, 0));
        assert_eq!(result.monthly.direction, TrendDirection::Decreasing);
        // Year to date is 150,000; the negative prediction adds nothing.
        assert_eq!(result.yearly.value, Decimal::new(150_000, 0));
    }

    #[test]
    fn test_yearly_confidence_damped_by_depth() {
        // Two months of perfectly linear data fit with r2 = 1 but carry
        // only 2/6 of the yearly confidence.
        let shifts = vec![
            shift("a", "2025-01-10", 1500, 2400),
            shift("b", "2025-02-10", 1500, 2400),
        ];
        let result = engine().forecast(&request(shifts)).unwrap();
        assert_eq!(result.monthly.confidence, Decimal::ONE);
        assert_eq!(
            result.yearly.confidence,
            Decimal::from(2u32) / Decimal::from(6u32)
        );
    }
}
