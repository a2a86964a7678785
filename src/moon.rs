use chrono::{DateTime, TimeZone};

use crate::math::floored_mod;
use crate::time::julian_date;

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.53;

/// Midnight Julian date of the reference new moon, 2000-01-06.
const REFERENCE_NEW_MOON: f64 = 2_451_549.5;

/// Phase of the moon on the UTC day containing `date_time`.
///
/// Counts whole days since the new moon of 2000-01-06 and reduces them modulo the
/// synodic month. The value is constant across a UTC day.
///
/// # Returns
///
/// A fraction in `[0, 1)`: `0` is new moon, `0.5` full moon.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sunrise_calculator::moon_phase;
///
/// let reference = Utc.with_ymd_and_hms(2000, 1, 6, 12, 24, 1).unwrap();
/// assert_eq!(moon_phase(&reference), 0.0);
/// ```
pub fn moon_phase<Tz: TimeZone>(date_time: &DateTime<Tz>) -> f64 {
    let elapsed = julian_date(date_time, false) - REFERENCE_NEW_MOON;
    floored_mod(elapsed, SYNODIC_MONTH) / SYNODIC_MONTH
}
