//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! policy and regulatory threshold tables from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EnginePolicy, JurisdictionInfo, RegulatoryRuleSet, ThresholdRow};

/// Loads engine configuration from a YAML directory.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── policy.yaml              # Engine policy constants
/// └── jurisdictions/
///     └── jp/
///         ├── jurisdiction.yaml    # Jurisdiction metadata
///         └── thresholds/
///             ├── 2000-01-01.yaml  # Row effective from this date
///             └── 2025-01-01.yaml
/// ```
///
/// A new law change is a new row file with a later `effective_from`; no
/// code change is needed.
///
/// # Example
///
/// ```no_run
/// use forecast_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config").unwrap();
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let row = loader.rule_set().thresholds_for("jp", as_of).unwrap();
/// println!("Tax wall: {}", row.tax_annual);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rule_set: RegulatoryRuleSet,
    policy: EnginePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any required file is missing
    /// ([`EngineError::ConfigNotFound`]) or contains invalid YAML
    /// ([`EngineError::ConfigParseError`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<EnginePolicy>(&policy_path)?;

        let jurisdictions_dir = path.join("jurisdictions");
        let rule_set = Self::load_jurisdictions(&jurisdictions_dir)?;

        Ok(Self { rule_set, policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every jurisdiction directory into a rule set.
    fn load_jurisdictions(dir: &Path) -> EngineResult<RegulatoryRuleSet> {
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut rule_set = RegulatoryRuleSet::new();
        let mut loaded_any = false;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let jurisdiction_dir = entry.path();
            if !jurisdiction_dir.is_dir() {
                continue;
            }

            let info =
                Self::load_yaml::<JurisdictionInfo>(&jurisdiction_dir.join("jurisdiction.yaml"))?;
            let rows = Self::load_threshold_rows(&jurisdiction_dir.join("thresholds"))?;
            rule_set.add_jurisdiction(info, rows);
            loaded_any = true;
        }

        if !loaded_any {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no jurisdiction directories found)", dir_str),
            });
        }

        Ok(rule_set)
    }

    /// Loads all threshold row files from a thresholds directory.
    fn load_threshold_rows(rows_dir: &Path) -> EngineResult<Vec<ThresholdRow>> {
        let rows_dir_str = rows_dir.display().to_string();

        if !rows_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: rows_dir_str });
        }

        let entries = fs::read_dir(rows_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rows_dir_str.clone(),
        })?;

        let mut rows = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rows_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rows.push(Self::load_yaml::<ThresholdRow>(&path)?);
            }
        }

        if rows.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no threshold row files found)", rows_dir_str),
            });
        }

        Ok(rows)
    }

    /// Returns the loaded rule set.
    pub fn rule_set(&self) -> &RegulatoryRuleSet {
        &self.rule_set
    }

    /// Returns the loaded engine policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Consumes the loader and returns its parts, ready to hand to
    /// [`crate::forecast::ForecastEngine::new`].
    pub fn into_parts(self) -> (RegulatoryRuleSet, EnginePolicy) {
        (self.rule_set, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config"
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_jp_jurisdiction_metadata() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let info = loader.rule_set().jurisdiction("jp").unwrap();
        assert_eq!(info.key, "jp");
        assert_eq!(info.currency, "JPY");
    }

    #[test]
    fn test_jp_threshold_rows_effective_dating() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let before = loader
            .rule_set()
            .thresholds_for("jp", date("2024-06-01"))
            .unwrap();
        assert_eq!(before.tax_annual, Decimal::new(1_030_000, 0));

        let after = loader
            .rule_set()
            .thresholds_for("jp", date("2025-06-01"))
            .unwrap();
        assert_eq!(after.tax_annual, Decimal::new(1_230_000, 0));
    }

    #[test]
    fn test_policy_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.policy();
        assert_eq!(policy.max_candidates, 20);
        assert!(policy.market_baseline_rate > Decimal::ZERO);
        assert!(policy.weekend_block.duration_hours > policy.weekday_block.duration_hours);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_into_parts() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let (rule_set, policy) = loader.into_parts();
        assert!(rule_set.thresholds_for("jp", date("2025-06-01")).is_ok());
        assert_eq!(policy.max_candidates, 20);
    }
}
