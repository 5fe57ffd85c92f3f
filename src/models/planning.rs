//! Planning window model.
//!
//! This module contains the [`PlanningWindow`] type describing the calendar
//! month the suggestion generator and schedule optimizer plan into.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A target calendar month to plan shifts into.
///
/// # Example
///
/// ```
/// use forecast_engine::models::PlanningWindow;
/// use chrono::NaiveDate;
///
/// let window = PlanningWindow::new(2025, 5);
/// assert_eq!(window.day_count(), 31);
/// assert_eq!(window.first_day(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWindow {
    /// The calendar year of the window.
    pub year: i32,
    /// The calendar month of the window (1-12).
    pub month: u32,
}

impl PlanningWindow {
    /// Creates a planning window for the given year and month.
    ///
    /// # Panics
    ///
    /// Panics if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Self {
        assert!((1..=12).contains(&month), "month must be 1-12");
        Self { year, month }
    }

    /// Returns the window covering the calendar month after `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use forecast_engine::models::PlanningWindow;
    /// use chrono::NaiveDate;
    ///
    /// let as_of = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
    /// let window = PlanningWindow::following(as_of);
    /// assert_eq!((window.year, window.month), (2026, 1));
    /// ```
    pub fn following(date: NaiveDate) -> Self {
        if date.month() == 12 {
            Self::new(date.year() + 1, 1)
        } else {
            Self::new(date.year(), date.month() + 1)
        }
    }

    /// Returns the first day of the window.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid first of month")
    }

    /// Returns the number of days in the window's month.
    pub fn day_count(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .expect("valid first of month");
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Iterates over every date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let first = self.first_day();
        (0..self.day_count()).map(move |offset| first + chrono::Duration::days(i64::from(offset)))
    }

    /// Checks if a given date falls within this window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}
