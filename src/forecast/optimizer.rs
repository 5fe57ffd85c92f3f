//! Constrained greedy schedule optimization.
//!
//! Selects a subset of the candidate shifts under earnings and weekly-hour
//! constraints, then scores the resulting schedule for work-life balance
//! and threshold risk and attaches rule-based recommendations.
//!
//! The admission loop is a single-pass greedy heuristic, a documented
//! approximation: it walks the objective-sorted candidates once and skips
//! any shift that would break a constraint, without backtracking. It does
//! not guarantee a globally optimal schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EnginePolicy;
use crate::models::{PlanningWindow, Recommendation, RecommendationKind, SuggestedShift};

use super::risk::{RiskAssessment, RiskTier};

/// Weekly hours above which the balance score starts to fall.
const BALANCE_FULL_LOAD_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Hours of overload that cost one balance point.
const BALANCE_HOURS_PER_POINT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Risk score above which a decrease is recommended.
const RISK_SCORE_HIGH: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Risk score below which spare capacity may exist.
const RISK_SCORE_LOW: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Balance score below which the workload is too heavy.
const BALANCE_SCORE_LOW: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Balance score above which capacity can grow.
const BALANCE_SCORE_COMFORTABLE: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// What the optimizer should optimize the schedule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationObjective {
    /// Prefer the highest-earning shifts.
    MaximizeEarnings,
    /// Prefer low-rate shifts to stretch hours under the wall.
    MinimizeTaxBurden,
    /// Prefer shifts close to the reference length.
    BalanceWorkload,
}

/// Caller-supplied scheduling constraints. Absent fields are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    /// Maximum average weekly hours over the planning window.
    pub max_weekly_hours: Option<Decimal>,
    /// Maximum cumulative earnings the schedule may add.
    pub annual_earnings_limit: Option<Decimal>,
}

/// The optimized schedule with its scores and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptimizationResult {
    /// The admitted candidate shifts, in admission order.
    pub selected_shifts: Vec<SuggestedShift>,
    /// Total scheduled hours.
    pub total_hours: Decimal,
    /// Total expected earnings (always the sum over `selected_shifts`).
    pub total_earnings: Decimal,
    /// Work-life balance score in `[1, 10]`.
    pub work_life_balance_score: Decimal,
    /// Threshold proximity score in `[0, 100]`.
    pub risk_score: Decimal,
    /// Rule-generated recommendations (at least one).
    pub recommendations: Vec<Recommendation>,
}

/// Greedily selects candidates under the supplied constraints.
///
/// Candidates are re-sorted per the objective (stable, with a
/// date-then-source-id tie-break so equal keys admit the chronologically
/// earliest shift first), then admitted one by one; a shift that would
/// push cumulative earnings past the effective limit or the weekly-hour
/// rate past `max_weekly_hours` is skipped, not a stopping point.
///
/// When the standalone risk tier is `Warning` or `Danger` the effective
/// earnings cap tightens to the remaining headroom under the wall
/// (`threshold - year_to_date`, floored at zero) if that is lower than
/// the caller's limit.
///
/// An empty candidate list yields a zero-valued result with a single
/// `Maintain` recommendation, never an error.
pub fn optimize_schedule(
    candidates: &[SuggestedShift],
    constraints: &ScheduleConstraints,
    objective: OptimizationObjective,
    window: PlanningWindow,
    risk: &RiskAssessment,
    year_to_date_earnings: Decimal,
    policy: &EnginePolicy,
) -> ScheduleOptimizationResult {
    let weeks = Decimal::from(window.day_count()) / Decimal::new(7, 0);

    if candidates.is_empty() {
        return empty_result(risk, year_to_date_earnings);
    }

    let mut ordered: Vec<&SuggestedShift> = candidates.iter().collect();
    sort_for_objective(&mut ordered, objective, policy);

    let effective_limit = effective_earnings_limit(constraints, risk, year_to_date_earnings);

    let mut selected: Vec<SuggestedShift> = Vec::new();
    let mut total_hours = Decimal::ZERO;
    let mut total_earnings = Decimal::ZERO;

    for candidate in ordered {
        let hours = candidate.hours();

        if let Some(limit) = effective_limit {
            if total_earnings + candidate.expected_earnings > limit {
                continue;
            }
        }
        if let Some(max_weekly) = constraints.max_weekly_hours {
            let weekly_rate = (total_hours + hours) / weeks;
            if weekly_rate > max_weekly {
                continue;
            }
        }

        total_hours += hours;
        total_earnings += candidate.expected_earnings;
        selected.push((*candidate).clone());
    }

    let weekly_hours = total_hours / weeks;
    let work_life_balance_score = balance_score(weekly_hours);
    let risk_score = schedule_risk_score(year_to_date_earnings + total_earnings, risk.threshold);
    let recommendations = build_recommendations(risk_score, work_life_balance_score);

    ScheduleOptimizationResult {
        selected_shifts: selected,
        total_hours,
        total_earnings,
        work_life_balance_score,
        risk_score,
        recommendations,
    }
}

fn empty_result(risk: &RiskAssessment, year_to_date_earnings: Decimal) -> ScheduleOptimizationResult {
    ScheduleOptimizationResult {
        selected_shifts: Vec::new(),
        total_hours: Decimal::ZERO,
        total_earnings: Decimal::ZERO,
        work_life_balance_score: Decimal::new(10, 0),
        risk_score: schedule_risk_score(year_to_date_earnings, risk.threshold),
        recommendations: vec![maintain_recommendation()],
    }
}

/// Sorts candidates for the objective; all orderings are deterministic.
fn sort_for_objective(
    ordered: &mut [&SuggestedShift],
    objective: OptimizationObjective,
    policy: &EnginePolicy,
) {
    let tie_break = |a: &SuggestedShift, b: &SuggestedShift| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.work_source_id.cmp(&b.work_source_id))
            .then_with(|| a.start.cmp(&b.start))
    };

    match objective {
        OptimizationObjective::MaximizeEarnings => {
            ordered.sort_by(|a, b| {
                b.expected_earnings
                    .cmp(&a.expected_earnings)
                    .then_with(|| tie_break(a, b))
            });
        }
        OptimizationObjective::MinimizeTaxBurden => {
            ordered.sort_by(|a, b| {
                hourly_cost(a)
                    .cmp(&hourly_cost(b))
                    .then_with(|| tie_break(a, b))
            });
        }
        OptimizationObjective::BalanceWorkload => {
            let reference = policy.reference_shift_hours;
            ordered.sort_by(|a, b| {
                let deviation_a = (a.hours() - reference).abs();
                let deviation_b = (b.hours() - reference).abs();
                deviation_a.cmp(&deviation_b).then_with(|| tie_break(a, b))
            });
        }
    }
}

/// The earnings cap the admission loop enforces.
///
/// Starts from the caller's limit; a Warning or Danger risk tier tightens
/// it to the remaining headroom under the wall when that is lower.
fn effective_earnings_limit(
    constraints: &ScheduleConstraints,
    risk: &RiskAssessment,
    year_to_date_earnings: Decimal,
) -> Option<Decimal> {
    let mut limit = constraints.annual_earnings_limit;

    if risk.tier != RiskTier::Safe {
        let headroom = (risk.threshold - year_to_date_earnings).max(Decimal::ZERO);
        limit = Some(limit.map_or(headroom, |l| l.min(headroom)));
    }

    limit
}

/// Effective hourly rate of a candidate; zero-length shifts sort first
/// without dividing by zero.
fn hourly_cost(candidate: &SuggestedShift) -> Decimal {
    let hours = candidate.hours();
    if hours.is_zero() {
        Decimal::ZERO
    } else {
        candidate.expected_earnings / hours
    }
}

/// `clamp(1, 10, 10 - max(0, weekly_hours - 40) / 5)`.
fn balance_score(weekly_hours: Decimal) -> Decimal {
    let overload = (weekly_hours - BALANCE_FULL_LOAD_HOURS).max(Decimal::ZERO);
    (Decimal::new(10, 0) - overload / BALANCE_HOURS_PER_POINT)
        .clamp(Decimal::ONE, Decimal::new(10, 0))
}

/// `min(100, 100 * projection / threshold)`, with the zero-threshold
/// guard resolving to the extremes instead of dividing.
fn schedule_risk_score(annual_projection: Decimal, threshold: Decimal) -> Decimal {
    if threshold.is_zero() {
        if annual_projection > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        (Decimal::ONE_HUNDRED * annual_projection / threshold).min(Decimal::ONE_HUNDRED)
    }
}

/// Rule-based and cumulative: several recommendations may fire together.
fn build_recommendations(risk_score: Decimal, balance_score: Decimal) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if risk_score > RISK_SCORE_HIGH {
        recommendations.push(Recommendation {
            kind: RecommendationKind::DecreaseHours,
            message: "Projected earnings are close to the applicable threshold".to_string(),
            impact: "Dropping the lowest-value shifts keeps the year under the wall".to_string(),
        });
    }
    if balance_score < BALANCE_SCORE_LOW {
        recommendations.push(Recommendation {
            kind: RecommendationKind::ReduceWorkload,
            message: "The scheduled weekly hours are heavy".to_string(),
            impact: "A lighter week protects long-term consistency".to_string(),
        });
    }
    if risk_score < RISK_SCORE_LOW && balance_score > BALANCE_SCORE_COMFORTABLE {
        recommendations.push(Recommendation {
            kind: RecommendationKind::IncreaseCapacity,
            message: "Earnings headroom and schedule capacity are both available".to_string(),
            impact: "Additional shifts fit without nearing the threshold".to_string(),
        });
    }
    if recommendations.is_empty() {
        recommendations.push(maintain_recommendation());
    }

    recommendations
}

fn maintain_recommendation() -> Recommendation {
    Recommendation {
        kind: RecommendationKind::Maintain,
        message: "The current schedule is well calibrated".to_string(),
        impact: "No change to projected earnings".to_string(),
    }
}
