//! Scheduling horizon and roster configuration.
//!
//! The horizon is the closed, contiguous date range `[start, end]` over
//! which shifts are assigned. `RosterConfig` bundles the horizon with the
//! shift enumeration, holiday list, and weekend definition — the immutable
//! configuration threaded through model assembly.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::shift::ShiftSet;

/// Error constructing a [`Horizon`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HorizonError {
    /// Start date is after the end date.
    #[error("horizon start {start} is after end {end}")]
    StartAfterEnd {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// A contiguous, inclusive calendar date range.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::models::Horizon;
///
/// let h = Horizon::new(
///     NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 14).unwrap(),
/// ).unwrap();
/// assert_eq!(h.len(), 5);
/// assert_eq!(h.index_of(h.date_at(2)), Some(2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Horizon {
    start: NaiveDate,
    end: NaiveDate,
}

impl Horizon {
    /// Creates a horizon spanning `[start, end]` inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, HorizonError> {
        if start > end {
            return Err(HorizonError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// First date of the horizon.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the horizon.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the horizon. Always at least 1.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Whether the horizon is empty. Always false for a constructed horizon.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Date at a day index (0 = start).
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn date_at(&self, index: usize) -> NaiveDate {
        assert!(index < self.len(), "day index {index} out of horizon");
        self.start + Duration::days(index as i64)
    }

    /// Day index of a date, or `None` if outside the horizon.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.end {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    /// Iterates all dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len()).map(|i| self.date_at(i))
    }
}

/// Immutable configuration for roster model assembly.
///
/// Holds the shift enumeration, the horizon, the holiday list, and the
/// weekdays counted as weekend. Weekend defaults to Saturday and Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// The fixed shift enumeration.
    pub shift_set: ShiftSet,
    /// The scheduling horizon.
    pub horizon: Horizon,
    /// Designated holiday dates (subset membership only).
    pub holidays: BTreeSet<NaiveDate>,
    /// Weekdays counted as weekend.
    pub weekend_days: Vec<Weekday>,
}

impl RosterConfig {
    /// Creates a config with no holidays and a Saturday/Sunday weekend.
    pub fn new(shift_set: ShiftSet, horizon: Horizon) -> Self {
        Self {
            shift_set,
            horizon,
            holidays: BTreeSet::new(),
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }

    /// Sets the holiday list.
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays = holidays.into_iter().collect();
        self
    }

    /// Sets the weekend weekdays.
    pub fn with_weekend_days(mut self, days: Vec<Weekday>) -> Self {
        self.weekend_days = days;
        self
    }

    /// Whether a date is a designated day off (weekend weekday or holiday).
    pub fn is_designated_off(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday()) || self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_shifts() -> ShiftSet {
        ShiftSet::new(vec!["day".into(), "rest".into()], "rest").unwrap()
    }

    #[test]
    fn test_horizon_len_and_dates() {
        let h = Horizon::new(date(2025, 4, 10), date(2025, 5, 7)).unwrap();
        assert_eq!(h.len(), 28);
        assert_eq!(h.date_at(0), date(2025, 4, 10));
        assert_eq!(h.date_at(27), date(2025, 5, 7));
        assert_eq!(h.dates().count(), 28);
    }

    #[test]
    fn test_horizon_index_of() {
        let h = Horizon::new(date(2025, 4, 10), date(2025, 4, 14)).unwrap();
        assert_eq!(h.index_of(date(2025, 4, 12)), Some(2));
        assert_eq!(h.index_of(date(2025, 4, 9)), None);
        assert_eq!(h.index_of(date(2025, 4, 15)), None);
    }

    #[test]
    fn test_horizon_single_day() {
        let h = Horizon::new(date(2025, 4, 10), date(2025, 4, 10)).unwrap();
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_horizon_start_after_end() {
        let err = Horizon::new(date(2025, 4, 14), date(2025, 4, 10)).unwrap_err();
        assert!(matches!(err, HorizonError::StartAfterEnd { .. }));
    }

    #[test]
    fn test_designated_off() {
        // 2025-04-12 is a Saturday; 2025-04-29 is a Japanese holiday (Tue).
        let h = Horizon::new(date(2025, 4, 10), date(2025, 5, 7)).unwrap();
        let config = RosterConfig::new(sample_shifts(), h).with_holidays([date(2025, 4, 29)]);

        assert!(config.is_designated_off(date(2025, 4, 12)));
        assert!(config.is_designated_off(date(2025, 4, 29)));
        assert!(!config.is_designated_off(date(2025, 4, 30)));
    }

    #[test]
    fn test_custom_weekend() {
        let h = Horizon::new(date(2025, 4, 10), date(2025, 4, 20)).unwrap();
        let config =
            RosterConfig::new(sample_shifts(), h).with_weekend_days(vec![Weekday::Sun]);

        // 2025-04-12 Saturday is no longer designated off.
        assert!(!config.is_designated_off(date(2025, 4, 12)));
        assert!(config.is_designated_off(date(2025, 4, 13)));
    }
}
