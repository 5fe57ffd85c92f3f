//! Configuration for the forecasting engine.
//!
//! Two kinds of configuration exist: the effective-dated regulatory
//! threshold tables ("dependency walls") per jurisdiction, and the engine
//! policy constants used by scoring and suggestion generation. Both can be
//! loaded from a YAML directory with [`ConfigLoader`] or constructed
//! directly in code.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EnginePolicy, JurisdictionInfo, RegulatoryRuleSet, SuggestionBlock, ThresholdRow,
};
