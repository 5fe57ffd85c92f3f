//! Per-work-source scoring and tier classification.
//!
//! For each work source, computes efficiency against the market baseline,
//! shift-regularity consistency, and pay-rate growth, then classifies a
//! recommendation tier that decides how much future scheduling weight the
//! source receives.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EnginePolicy;
use crate::models::{ShiftRecord, WorkSource};

/// Shifts per month at which consistency saturates at 1.
const FULL_CONSISTENCY_SHIFTS_PER_MONTH: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Sample size for the early/recent growth comparison.
const GROWTH_SAMPLE_SIZE: usize = 5;

/// Categorical recommendation for a work source's scheduling weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// High-efficiency, highly consistent source; schedule it first.
    Focus,
    /// Solid source worth keeping at current weight.
    Maintain,
    /// Below-baseline source; shift weight away from it.
    Reduce,
    /// Source not worth keeping.
    Eliminate,
}

/// Derived scores for one work source.
///
/// Recomputed on every forecast call from the raw shift history; never
/// cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSourceScore {
    /// The scored work source.
    pub work_source_id: String,
    /// The work source's display name.
    pub name: String,
    /// Total hours worked at this source.
    pub total_hours: Decimal,
    /// Total earnings from this source.
    pub total_earnings: Decimal,
    /// Realized average hourly rate (earnings over hours).
    pub avg_hourly_rate: Decimal,
    /// Realized rate relative to the market baseline rate.
    pub efficiency: Decimal,
    /// Shift regularity in `[0, 1]` (8 shifts/month saturates it).
    pub consistency: Decimal,
    /// Relative pay-rate change, recent shifts vs earliest shifts.
    pub growth_rate: Decimal,
    /// The recommendation tier.
    pub tier: RecommendationTier,
}

impl WorkSourceScore {
    /// A zero score for a source with no usable history.
    fn empty(source: &WorkSource) -> Self {
        Self {
            work_source_id: source.id.clone(),
            name: source.name.clone(),
            total_hours: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            avg_hourly_rate: Decimal::ZERO,
            efficiency: Decimal::ZERO,
            consistency: Decimal::ZERO,
            growth_rate: Decimal::ZERO,
            tier: RecommendationTier::Eliminate,
        }
    }
}

/// Scores every work source from its own shift history.
///
/// Sources appear in the output in registry order. A source with zero
/// worked hours scores zero on every axis and is classified `Eliminate`;
/// no division by zero can propagate into the scores.
pub fn score_work_sources(
    shifts: &[ShiftRecord],
    sources: &[WorkSource],
    policy: &EnginePolicy,
) -> Vec<WorkSourceScore> {
    sources
        .iter()
        .map(|source| score_one_source(shifts, source, policy))
        .collect()
}

fn score_one_source(
    shifts: &[ShiftRecord],
    source: &WorkSource,
    policy: &EnginePolicy,
) -> WorkSourceScore {
    let mut own_shifts: Vec<&ShiftRecord> = shifts
        .iter()
        .filter(|shift| shift.work_source_id == source.id)
        .collect();
    own_shifts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let total_hours = own_shifts
        .iter()
        .fold(Decimal::ZERO, |sum, shift| sum + shift.worked_hours());
    let total_earnings = own_shifts
        .iter()
        .fold(Decimal::ZERO, |sum, shift| sum + shift.total_earnings);

    if total_hours.is_zero() {
        return WorkSourceScore::empty(source);
    }

    let avg_hourly_rate = total_earnings / total_hours;

    let efficiency = if policy.market_baseline_rate.is_zero() {
        Decimal::ZERO
    } else {
        avg_hourly_rate / policy.market_baseline_rate
    };

    let consistency = consistency_score(&own_shifts);
    let growth_rate = growth_rate(&own_shifts);

    let tier = classify_tier(efficiency, consistency);

    WorkSourceScore {
        work_source_id: source.id.clone(),
        name: source.name.clone(),
        total_hours,
        total_earnings,
        avg_hourly_rate,
        efficiency,
        consistency,
        growth_rate,
        tier,
    }
}

/// Shift regularity: shifts per spanned month against the saturation
/// target, capped at 1.
fn consistency_score(own_shifts: &[&ShiftRecord]) -> Decimal {
    let first = own_shifts.first().expect("caller checked non-empty");
    let last = own_shifts.last().expect("caller checked non-empty");

    // Inclusive month count between the earliest and latest shift.
    let span = (i64::from(last.date.year()) * 12 + i64::from(last.date.month()))
        - (i64::from(first.date.year()) * 12 + i64::from(first.date.month()))
        + 1;
    let month_span = Decimal::from(span.max(1));

    let shifts_per_month = Decimal::from(own_shifts.len() as u64) / month_span;
    (shifts_per_month / FULL_CONSISTENCY_SHIFTS_PER_MONTH).min(Decimal::ONE)
}

/// Relative change of the mean recorded hourly rate, most recent
/// [`GROWTH_SAMPLE_SIZE`] shifts vs the earliest ones (all shifts when
/// fewer exist). Zero when the early mean is zero.
fn growth_rate(own_shifts: &[&ShiftRecord]) -> Decimal {
    let sample = GROWTH_SAMPLE_SIZE.min(own_shifts.len());

    let early_avg = own_shifts
        .iter()
        .take(sample)
        .fold(Decimal::ZERO, |sum, shift| sum + shift.hourly_rate)
        / Decimal::from(sample as u64);
    let recent_avg = own_shifts
        .iter()
        .rev()
        .take(sample)
        .fold(Decimal::ZERO, |sum, shift| sum + shift.hourly_rate)
        / Decimal::from(sample as u64);

    if early_avg.is_zero() {
        Decimal::ZERO
    } else {
        (recent_avg - early_avg) / early_avg
    }
}

/// The tier ladder, evaluated in fixed order; first match wins.
fn classify_tier(efficiency: Decimal, consistency: Decimal) -> RecommendationTier {
    let eff_focus = Decimal::from_parts(12, 0, 0, false, 1); // 1.2
    let eff_maintain = Decimal::from_parts(9, 0, 0, false, 1); // 0.9
    let eff_reduce = Decimal::from_parts(7, 0, 0, false, 1); // 0.7
    let cons_focus = Decimal::from_parts(7, 0, 0, false, 1); // 0.7
    let cons_maintain = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

    if efficiency > eff_focus && consistency > cons_focus {
        RecommendationTier::Focus
    } else if efficiency > eff_maintain && consistency > cons_maintain {
        RecommendationTier::Maintain
    } else if efficiency > eff_reduce {
        RecommendationTier::Reduce
    } else {
        RecommendationTier::Eliminate
    }
}
