//! Candidate shift suggestion for an upcoming planning window.
//!
//! Proposes one candidate shift per day of the target month, donated by
//! the work sources worth keeping, with day-type-specific time blocks and
//! a rationale explaining each suggestion.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;

use crate::config::EnginePolicy;
use crate::models::{PlanningWindow, Priority, ReasonTag, SuggestedShift, TimeOfDay};

use super::source_score::{RecommendationTier, WorkSourceScore};

/// Growth rate above which the growth-trend tag is attached.
const GROWTH_TAG_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

/// Efficiency above which the high-rate tag is attached.
const HIGH_RATE_TAG_THRESHOLD: Decimal = Decimal::from_parts(12, 0, 0, false, 1); // 1.2

/// Consistency above which the consistent-history tag is attached.
const CONSISTENT_TAG_THRESHOLD: Decimal = Decimal::from_parts(7, 0, 0, false, 1); // 0.7

/// Generates ranked candidate shifts for the planning window.
///
/// Only `Focus` and `Maintain` sources with a positive realized rate are
/// eligible donors, ordered by descending efficiency (ties broken by
/// source id). Days of the target month each get one candidate, the donor
/// chosen round-robin by day-of-week index; weekends get the longer,
/// earlier policy block and weekdays the shorter evening block. Generation
/// stops at the policy's candidate cap to keep the optimizer tractable.
///
/// The output is sorted by priority descending, expected earnings
/// descending, then earliest date (a deterministic tie-break).
///
/// An empty eligible set produces an empty candidate list, which is a
/// valid low-confidence outcome rather than an error.
pub fn generate_suggestions(
    scores: &[WorkSourceScore],
    window: PlanningWindow,
    policy: &EnginePolicy,
) -> Vec<SuggestedShift> {
    let mut eligible: Vec<&WorkSourceScore> = scores
        .iter()
        .filter(|score| {
            matches!(
                score.tier,
                RecommendationTier::Focus | RecommendationTier::Maintain
            ) && score.avg_hourly_rate > Decimal::ZERO
        })
        .collect();
    eligible.sort_by(|a, b| {
        b.efficiency
            .cmp(&a.efficiency)
            .then_with(|| a.work_source_id.cmp(&b.work_source_id))
    });

    if eligible.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for day in window.days() {
        if candidates.len() >= policy.max_candidates {
            break;
        }

        let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
        let donor = eligible[day.weekday().num_days_from_monday() as usize % eligible.len()];
        let block = if weekend {
            policy.weekend_block
        } else {
            policy.weekday_block
        };

        let start = TimeOfDay::from_hm(block.start_hour, 0);
        let end = start.plus_hours(block.duration_hours);
        let hours = Decimal::from(u64::from(block.duration_hours));
        let expected_earnings = hours * donor.avg_hourly_rate;

        let priority = if donor.tier == RecommendationTier::Focus {
            Priority::High
        } else {
            Priority::Medium
        };

        let mut rationale = Vec::new();
        if donor.efficiency > HIGH_RATE_TAG_THRESHOLD {
            rationale.push(ReasonTag::HighRate);
        }
        if donor.consistency > CONSISTENT_TAG_THRESHOLD {
            rationale.push(ReasonTag::ConsistentHistory);
        }
        if donor.growth_rate > GROWTH_TAG_THRESHOLD {
            rationale.push(ReasonTag::GrowthTrend);
        }
        if weekend {
            rationale.push(ReasonTag::WeekendAvailability);
        }
        if expected_earnings >= policy.high_earnings_threshold {
            rationale.push(ReasonTag::HighEarnings);
        }

        candidates.push(SuggestedShift {
            date: day,
            start,
            end,
            work_source_id: donor.work_source_id.clone(),
            expected_earnings,
            priority,
            rationale,
        });
    }

    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.expected_earnings.cmp(&a.expected_earnings))
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.work_source_id.cmp(&b.work_source_id))
    });

    candidates
}
