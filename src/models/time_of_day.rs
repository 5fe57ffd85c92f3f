//! Time-of-day value type.
//!
//! Suggested shifts carry start and end times as a normalized
//! minutes-since-midnight representation. Durations between two times of
//! day are computed without constructing throwaway datetimes, so an end
//! time at or before the start unambiguously means next-day rollover.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minutes elapsed since midnight, always in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimeOfDay {
    /// Creates a time of day from hours and minutes.
    ///
    /// Inputs are normalized modulo one day, so `from_hm(24, 30)` is 00:30.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_engine::models::TimeOfDay;
    ///
    /// let t = TimeOfDay::from_hm(18, 30);
    /// assert_eq!(t.hour(), 18);
    /// assert_eq!(t.minute(), 30);
    /// ```
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        Self((hour * 60 + minute) % MINUTES_PER_DAY)
    }

    /// Returns the minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    /// Returns the hour component (0-23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Returns the minutes from `self` until `end`.
    ///
    /// An `end` at or before `self` is treated as falling on the next day,
    /// so the result is always in `1..=1440` for distinct times and 1440
    /// for an equal pair (a full-day wrap).
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_engine::models::TimeOfDay;
    ///
    /// let start = TimeOfDay::from_hm(22, 0);
    /// assert_eq!(start.minutes_until(TimeOfDay::from_hm(23, 30)), 90);
    /// assert_eq!(start.minutes_until(TimeOfDay::from_hm(6, 0)), 480);
    /// ```
    pub fn minutes_until(&self, end: TimeOfDay) -> u16 {
        if end.0 > self.0 {
            end.0 - self.0
        } else {
            MINUTES_PER_DAY - self.0 + end.0
        }
    }

    /// Returns the duration from `self` until `end` in hours.
    pub fn hours_until(&self, end: TimeOfDay) -> Decimal {
        Decimal::new(i64::from(self.minutes_until(end)), 0) / Decimal::new(60, 0)
    }

    /// Returns the time of day `hours` whole hours after `self`, wrapping
    /// past midnight.
    pub fn plus_hours(&self, hours: u16) -> Self {
        Self((self.0 + hours * 60) % MINUTES_PER_DAY)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hm_components() {
        let t = TimeOfDay::from_hm(9, 15);
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 15);
        assert_eq!(t.minutes_since_midnight(), 555);
    }

    #[test]
    fn test_from_hm_wraps_past_midnight() {
        assert_eq!(TimeOfDay::from_hm(24, 30), TimeOfDay::from_hm(0, 30));
    }

    #[test]
    fn test_minutes_until_same_day() {
        let start = TimeOfDay::from_hm(18, 0);
        assert_eq!(start.minutes_until(TimeOfDay::from_hm(21, 0)), 180);
    }

    #[test]
    fn test_minutes_until_rolls_over_midnight() {
        let start = TimeOfDay::from_hm(22, 0);
        assert_eq!(start.minutes_until(TimeOfDay::from_hm(6, 0)), 480);
    }

    #[test]
    fn test_minutes_until_equal_times_is_full_day() {
        let t = TimeOfDay::from_hm(10, 0);
        assert_eq!(t.minutes_until(t), 1440);
    }

    #[test]
    fn test_hours_until_fractional() {
        let start = TimeOfDay::from_hm(18, 0);
        assert_eq!(
            start.hours_until(TimeOfDay::from_hm(21, 30)),
            Decimal::new(35, 1) // 3.5
        );
    }

    #[test]
    fn test_plus_hours_wraps() {
        assert_eq!(TimeOfDay::from_hm(22, 0).plus_hours(4), TimeOfDay::from_hm(2, 0));
        assert_eq!(TimeOfDay::from_hm(10, 0).plus_hours(6), TimeOfDay::from_hm(16, 0));
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(TimeOfDay::from_hm(9, 5).to_string(), "09:05");
    }

    #[test]
    fn test_serde_transparent() {
        let t = TimeOfDay::from_hm(18, 0);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "1080");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
