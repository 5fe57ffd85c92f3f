//! Configuration types for the forecasting engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the effective-dated
//! regulatory threshold tables and the engine policy constants.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Metadata about a jurisdiction's threshold table.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionInfo {
    /// The jurisdiction key (e.g., "jp").
    pub key: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// ISO 4217 currency code for all amounts in this jurisdiction.
    pub currency: String,
    /// URL to the statutory source the rows were taken from.
    pub source_url: String,
}

/// One effective-dated row of earnings thresholds for a jurisdiction.
///
/// Rows are never merged or interpolated: the row whose `effective_from`
/// is the latest one not after the evaluation date applies in full.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThresholdRow {
    /// The date this row takes effect (inclusive).
    pub effective_from: NaiveDate,
    /// The annual earnings wall above which income tax obligations begin.
    pub tax_annual: Decimal,
    /// The annual earnings wall above which social insurance obligations begin.
    pub social_insurance_annual: Decimal,
    /// The monthly earnings wall for employer-based social insurance
    /// enrollment (a monthly-amount-times-twelve rule).
    pub social_monthly: Decimal,
}

impl ThresholdRow {
    /// Returns the monthly social insurance wall annualized (x12).
    pub fn social_monthly_annualized(&self) -> Decimal {
        self.social_monthly * Decimal::new(12, 0)
    }
}

/// Threshold rows for a single jurisdiction, sorted by effective date.
#[derive(Debug, Clone)]
struct JurisdictionRules {
    info: JurisdictionInfo,
    /// Rows sorted by `effective_from` ascending.
    rows: Vec<ThresholdRow>,
}

/// The effective-dated table of earnings thresholds per jurisdiction.
///
/// A rule set can be loaded from YAML via [`crate::config::ConfigLoader`]
/// or built in code with [`RegulatoryRuleSet::new`] and
/// [`RegulatoryRuleSet::add_jurisdiction`]. Adding a new law change never
/// requires code changes, only a new row with a later `effective_from`.
///
/// # Example
///
/// ```
/// use forecast_engine::config::{JurisdictionInfo, RegulatoryRuleSet, ThresholdRow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut rule_set = RegulatoryRuleSet::new();
/// rule_set.add_jurisdiction(
///     JurisdictionInfo {
///         key: "jp".to_string(),
///         name: "Japan".to_string(),
///         currency: "JPY".to_string(),
///         source_url: "https://www.nta.go.jp/".to_string(),
///     },
///     vec![ThresholdRow {
///         effective_from: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
///         tax_annual: Decimal::new(1_030_000, 0),
///         social_insurance_annual: Decimal::new(1_300_000, 0),
///         social_monthly: Decimal::new(88_000, 0),
///     }],
/// );
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let row = rule_set.thresholds_for("jp", as_of).unwrap();
/// assert_eq!(row.tax_annual, Decimal::new(1_030_000, 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegulatoryRuleSet {
    jurisdictions: HashMap<String, JurisdictionRules>,
}

impl RegulatoryRuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a jurisdiction with its threshold rows.
    ///
    /// Rows are sorted by `effective_from`; adding the same key again
    /// replaces the previous rows.
    pub fn add_jurisdiction(&mut self, info: JurisdictionInfo, rows: Vec<ThresholdRow>) {
        let mut sorted_rows = rows;
        sorted_rows.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));
        self.jurisdictions.insert(
            info.key.clone(),
            JurisdictionRules {
                info,
                rows: sorted_rows,
            },
        );
    }

    /// Returns the metadata for a jurisdiction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownJurisdiction`] if the key has no rows.
    pub fn jurisdiction(&self, key: &str) -> EngineResult<&JurisdictionInfo> {
        self.jurisdictions
            .get(key)
            .map(|rules| &rules.info)
            .ok_or_else(|| EngineError::UnknownJurisdiction {
                key: key.to_string(),
            })
    }

    /// Returns the threshold row in effect for a jurisdiction on a date.
    ///
    /// Among all rows with `effective_from <= as_of`, the one with the
    /// maximum `effective_from` wins (most recently enacted rule). Rows are
    /// never interpolated.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownJurisdiction`] if the key has no rows at all.
    /// - [`EngineError::ThresholdNotFound`] if no row is effective yet on
    ///   `as_of`.
    ///
    /// There is no silent default-jurisdiction fallback; callers that want
    /// a default must apply it before calling.
    pub fn thresholds_for(&self, key: &str, as_of: NaiveDate) -> EngineResult<&ThresholdRow> {
        let rules = self
            .jurisdictions
            .get(key)
            .ok_or_else(|| EngineError::UnknownJurisdiction {
                key: key.to_string(),
            })?;

        // Rows are sorted ascending, so the last matching row is the most
        // recently enacted one.
        rules
            .rows
            .iter()
            .rfind(|row| row.effective_from <= as_of)
            .ok_or_else(|| EngineError::ThresholdNotFound {
                jurisdiction: key.to_string(),
                date: as_of,
            })
    }

    /// Returns the known jurisdiction keys.
    pub fn jurisdiction_keys(&self) -> impl Iterator<Item = &str> {
        self.jurisdictions.keys().map(String::as_str)
    }
}

/// A proposed shift block (start hour and whole-hour duration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SuggestionBlock {
    /// The hour of day the block starts at (0-23).
    pub start_hour: u16,
    /// The block length in whole hours.
    pub duration_hours: u16,
}

/// Policy constants used by scoring and suggestion generation.
///
/// These are deliberate policy choices, not values derived from data: the
/// market baseline rate efficiency is measured against, the shift blocks
/// proposed on weekdays and weekends, the candidate cap that keeps the
/// optimizer tractable, and the reference shift length for the
/// balance-workload objective.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnginePolicy {
    /// The market baseline hourly rate efficiency is measured against.
    pub market_baseline_rate: Decimal,
    /// The block proposed on weekdays (shorter, evening).
    pub weekday_block: SuggestionBlock,
    /// The block proposed on weekends (longer, earlier).
    pub weekend_block: SuggestionBlock,
    /// Upper bound on generated candidates per planning window.
    pub max_candidates: usize,
    /// Expected earnings at or above this amount get the high-earnings tag.
    pub high_earnings_threshold: Decimal,
    /// Reference shift length (hours) for the balance-workload objective.
    pub reference_shift_hours: Decimal,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            market_baseline_rate: Decimal::new(1200, 0),
            weekday_block: SuggestionBlock {
                start_hour: 18,
                duration_hours: 3,
            },
            weekend_block: SuggestionBlock {
                start_hour: 10,
                duration_hours: 6,
            },
            max_candidates: 20,
            high_earnings_threshold: Decimal::new(10_000, 0),
            reference_shift_hours: Decimal::new(6, 0),
        }
    }
}
