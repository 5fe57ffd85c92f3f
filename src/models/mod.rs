//! Data models for the forecasting engine.
//!
//! This module contains the read-only input models ([`ShiftRecord`],
//! [`WorkSource`]), the planning-window and time-of-day value types, and
//! the shared output vocabulary (suggested shifts, recommendations, trend
//! factors). Component-specific result types live next to their components
//! under [`crate::forecast`].

mod planning;
mod shift_record;
mod suggestion;
mod time_of_day;

pub use planning::PlanningWindow;
pub use shift_record::{ShiftRecord, WorkSource};
pub use suggestion::{
    ForecastFactor, Priority, ReasonTag, Recommendation, RecommendationKind, SuggestedShift,
    TrendDirection,
};
pub use time_of_day::TimeOfDay;
