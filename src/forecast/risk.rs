//! Threshold risk assessment.
//!
//! Converts a projected annual earnings total into a categorical risk
//! tier against the jurisdiction's tax wall. The tier feeds both the
//! standalone risk display and the optimizer's constraint tightening.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ratio above which the projection is in danger of crossing the wall.
pub const DANGER_RATIO: Decimal = Decimal::from_parts(95, 0, 0, false, 2); // 0.95

/// Ratio above which the projection warrants a warning.
pub const WARNING_RATIO: Decimal = Decimal::from_parts(80, 0, 0, false, 2); // 0.80

/// Categorical proximity of projected earnings to the active threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Comfortably below the wall.
    Safe,
    /// Approaching the wall; worth watching.
    Warning,
    /// About to cross (or already over) the wall.
    Danger,
}

/// The result of a risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The projected annual earnings that were assessed.
    pub projected_annual: Decimal,
    /// The tax wall the projection was assessed against.
    pub threshold: Decimal,
    /// `projected_annual / threshold` (zero when the threshold is zero).
    pub ratio: Decimal,
    /// The categorical tier.
    pub tier: RiskTier,
}

/// Assesses projected annual earnings against the tax wall.
///
/// The tier is monotone in the ratio: `> 0.95` is danger, `> 0.8` is
/// warning, anything else safe. A zero threshold cannot produce a
/// division by zero: a zero projection over a zero wall is safe, any
/// positive projection over it is danger, and the reported ratio stays
/// zero in both cases.
///
/// # Example
///
/// ```
/// use forecast_engine::forecast::{assess_risk, RiskTier};
/// use rust_decimal::Decimal;
///
/// let assessment = assess_risk(Decimal::new(990_000, 0), Decimal::new(1_030_000, 0));
/// assert_eq!(assessment.tier, RiskTier::Danger);
/// ```
pub fn assess_risk(projected_annual: Decimal, threshold: Decimal) -> RiskAssessment {
    if threshold.is_zero() {
        let tier = if projected_annual > Decimal::ZERO {
            RiskTier::Danger
        } else {
            RiskTier::Safe
        };
        return RiskAssessment {
            projected_annual,
            threshold,
            ratio: Decimal::ZERO,
            tier,
        };
    }

    let ratio = projected_annual / threshold;
    let tier = if ratio > DANGER_RATIO {
        RiskTier::Danger
    } else if ratio > WARNING_RATIO {
        RiskTier::Warning
    } else {
        RiskTier::Safe
    };

    RiskAssessment {
        projected_annual,
        threshold,
        ratio,
        tier,
    }
}
