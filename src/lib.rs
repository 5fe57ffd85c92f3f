//! Income Forecasting and Shift-Optimization Engine
//!
//! This crate turns a history of worked shifts into a statistical earnings
//! forecast, a per-work-source keep/drop classification, a set of suggested
//! future shifts, and a constrained schedule scored against jurisdiction
//! specific earnings thresholds ("dependency walls").

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
