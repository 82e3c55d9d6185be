//! Total hours calculation functionality.
//!
//! This module computes the decimal hours written into the total-hours
//! column from a record's shift start, shift end, and lunch duration.

use rust_decimal::Decimal;

use crate::models::{MINUTES_PER_DAY, TimeOfDay};

/// Calculates the hours worked in a shift, net of lunch.
///
/// A shift whose end is earlier than its start crosses midnight and gets
/// one day added. The same single wrap applies when lunch is longer than
/// the shift, so a negative net time becomes that many minutes short of a
/// full day.
///
/// # Arguments
///
/// * `start` - Shift start
/// * `end` - Shift end
/// * `lunch` - Unpaid lunch duration
///
/// # Returns
///
/// The hours as a decimal in `[0, 24)`. Inputs that are not valid clock
/// values are logged and yield zero; the record validator rejects them
/// before the engine gets this far.
///
/// # Example
///
/// ```
/// use srs_export::export::compute_total_hours;
/// use srs_export::models::TimeOfDay;
/// use rust_decimal::Decimal;
///
/// let hours = compute_total_hours(
///     TimeOfDay::new(22, 0),
///     TimeOfDay::new(6, 0),
///     TimeOfDay::MIDNIGHT,
/// );
/// assert_eq!(hours, Decimal::from(8));
/// ```
pub fn compute_total_hours(start: TimeOfDay, end: TimeOfDay, lunch: TimeOfDay) -> Decimal {
    match net_minutes(start, end, lunch) {
        Ok(minutes) => Decimal::from(minutes) / Decimal::from(60),
        Err(message) => {
            tracing::warn!(%start, %end, %lunch, "total hours defaulted to 0: {}", message);
            Decimal::ZERO
        }
    }
}

fn net_minutes(start: TimeOfDay, end: TimeOfDay, lunch: TimeOfDay) -> Result<i64, String> {
    for (label, time) in [("start", start), ("end", end), ("lunch", lunch)] {
        if !time.is_valid_clock() {
            return Err(format!("{} {} is not a valid time", label, time));
        }
    }

    let mut worked = i64::from(end.total_minutes())
        - i64::from(start.total_minutes())
        - i64::from(lunch.total_minutes());

    // Overnight shift
    if worked < 0 {
        worked += i64::from(MINUTES_PER_DAY);
    }
    Ok(worked.max(0))
}
