//! Time-of-day values written into the template.
//!
//! Spreadsheet time formats only apply to serial day values, so a
//! [`TimeOfDay`] is anchored to the spreadsheet epoch sentinel
//! (1899-12-30) before being converted.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// An hours-and-minutes value with no date component.
///
/// Fields are not range-checked on construction; the record validator
/// rejects values outside a 24-hour clock before anything is written.
///
/// # Example
///
/// ```
/// use srs_export::models::TimeOfDay;
///
/// let lunch = TimeOfDay::from_minutes(90);
/// assert_eq!(lunch, TimeOfDay::new(1, 30));
/// assert_eq!(lunch.to_string(), "01:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour component (0..=23 for a valid clock value).
    pub hours: u32,
    /// Minute component (0..=59 for a valid clock value).
    pub minutes: u32,
}

impl TimeOfDay {
    /// 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hours: 0,
        minutes: 0,
    };

    /// Creates a time of day from its components.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Converts a count of minutes since midnight into hours and minutes.
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Minutes since midnight.
    pub fn total_minutes(&self) -> u32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    /// Returns true if both components fit a 24-hour clock.
    pub fn is_valid_clock(&self) -> bool {
        self.hours <= 23 && self.minutes <= 59
    }

    /// Returns true for exactly 00:00.
    pub fn is_midnight(&self) -> bool {
        *self == Self::MIDNIGHT
    }

    /// Anchors this time to the spreadsheet epoch sentinel date.
    ///
    /// Returns `None` if the components are not a valid clock value.
    pub fn to_sentinel_datetime(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(self.hours, self.minutes, 0)?;
        Some(excel_epoch()?.and_time(time))
    }

    /// Returns the spreadsheet serial value (fraction of a day).
    ///
    /// # Example
    ///
    /// ```
    /// use srs_export::models::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::new(12, 0).excel_serial(), Some(0.5));
    /// assert_eq!(TimeOfDay::new(24, 0).excel_serial(), None);
    /// ```
    pub fn excel_serial(&self) -> Option<f64> {
        let stamp = self.to_sentinel_datetime()?;
        let epoch = excel_epoch()?.and_hms_opt(0, 0, 0)?;
        let elapsed = (stamp - epoch).num_minutes();
        Some(elapsed as f64 / f64::from(MINUTES_PER_DAY))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}
