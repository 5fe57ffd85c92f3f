//! Forecasting and shift-optimization logic.
//!
//! This module contains the computational components of the engine: monthly
//! aggregation, linear trend estimation, seasonality analysis, per-source
//! scoring, candidate shift suggestion, threshold risk assessment, the
//! constrained greedy schedule optimizer, and the facade that orchestrates
//! them into a single forecasting call.

mod facade;
mod monthly;
mod optimizer;
mod risk;
mod seasonality;
mod source_score;
mod suggestion;
mod trend;

pub use facade::{ForecastEngine, ForecastRequest, ForecastResult, MonthlyForecast, YearlyForecast};
pub use monthly::{MonthlyAggregate, aggregate_by_month};
pub use optimizer::{
    OptimizationObjective, ScheduleConstraints, ScheduleOptimizationResult, optimize_schedule,
};
pub use risk::{DANGER_RATIO, RiskAssessment, RiskTier, WARNING_RATIO, assess_risk};
pub use seasonality::{SeasonalityProfile, analyze_seasonality};
pub use source_score::{RecommendationTier, WorkSourceScore, score_work_sources};
pub use suggestion::generate_suggestions;
pub use trend::{TrendEstimate, estimate_trend};
