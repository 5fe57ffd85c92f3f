//! Shift record and work source models.
//!
//! This module defines the [`ShiftRecord`] and [`WorkSource`] structs, the
//! two read-only inputs supplied by the shift store and work-source
//! registry. The engine never mutates them and never writes back.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An employer or venue a shift can be worked at.
///
/// Owned by the external work-source registry; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSource {
    /// Unique identifier for the work source.
    pub id: String,
    /// The human-readable name of the work source.
    pub name: String,
    /// The default hourly rate offered by this work source.
    pub default_hourly_rate: Decimal,
}

/// An immutable historical record of one worked shift.
///
/// Created when a shift is logged by an external collaborator (manual entry,
/// the image-recognition pipeline, or the banking-transaction classifier).
/// `total_earnings` is stored alongside the rate and minutes for audit, even
/// though it is derivable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift record.
    pub id: String,
    /// The calendar date the shift was worked.
    pub date: NaiveDate,
    /// The work source the shift was worked at.
    pub work_source_id: String,
    /// The hourly rate paid for this shift, in currency minor units.
    pub hourly_rate: Decimal,
    /// The number of minutes worked.
    pub worked_minutes: i64,
    /// The total earnings for the shift (rate x hours, stored for audit).
    pub total_earnings: Decimal,
}

impl ShiftRecord {
    /// Returns the worked duration of the shift in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_engine::models::ShiftRecord;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = ShiftRecord {
    ///     id: "shift_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
    ///     work_source_id: "cafe".to_string(),
    ///     hourly_rate: Decimal::new(1200, 0),
    ///     worked_minutes: 270,
    ///     total_earnings: Decimal::new(5400, 0),
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(45, 1)); // 4.5 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        Decimal::new(self.worked_minutes, 0) / Decimal::new(60, 0)
    }

    /// Validates the record's internal consistency.
    ///
    /// Negative minutes, rates or earnings indicate a corrupted record from
    /// the store, which is a configuration-class failure rather than a
    /// degenerate-data condition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShiftRecord`] naming the offending
    /// field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.worked_minutes < 0 {
            return Err(EngineError::InvalidShiftRecord {
                shift_id: self.id.clone(),
                message: "worked minutes is negative".to_string(),
            });
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidShiftRecord {
                shift_id: self.id.clone(),
                message: "hourly rate is negative".to_string(),
            });
        }
        if self.total_earnings < Decimal::ZERO {
            return Err(EngineError::InvalidShiftRecord {
                shift_id: self.id.clone(),
                message: "total earnings is negative".to_string(),
            });
        }
        Ok(())
    }
}
