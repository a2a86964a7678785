use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use julian_day_converter::julian_day_to_unix_millis;

use crate::SunriseError;

/// Julian date of the J2000.0 epoch, 2000-01-01T12:00 UTC.
pub const J2000: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

pub(crate) const MINUTES_PER_DAY: f64 = 1440.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// TT − UTC in days, applied by [`current_julian_day`].
const TT_OFFSET_DAYS: f64 = 69.184 / SECONDS_PER_DAY;

/// `num_days_from_ce` of 2000-01-01.
const J2000_DAYS_FROM_CE: i32 = 730_120;

/// Compute the Julian date of a zoned date/time.
///
/// The zone is first resolved to UTC. The whole-day part counts UTC calendar days since
/// 2000-01-01; midnight mode then lands on the preceding UTC midnight (`.5`), instant mode
/// adds the fraction of the UTC day that has elapsed.
///
/// For every input `julian_date(t, false) <= julian_date(t, true) < julian_date(t, false) + 1`.
///
/// # Arguments
///
/// * `date_time` - Civil date/time in any chrono `TimeZone`
/// * `include_time` - `false` for the midnight anchor, `true` for the fractional instant
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sunrise_calculator::julian_date;
///
/// let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(julian_date(&noon, true), 2_451_545.0);
/// assert_eq!(julian_date(&noon, false), 2_451_544.5);
/// ```
pub fn julian_date<Tz: TimeZone>(date_time: &DateTime<Tz>, include_time: bool) -> f64 {
    let utc = date_time.naive_utc();
    let days = utc.date().num_days_from_ce() - J2000_DAYS_FROM_CE;
    let fraction = if include_time {
        // Whole milliseconds, so the instant never rounds up to the next midnight.
        // Leap seconds fold into the last regular second of the day.
        let millis = utc.num_seconds_from_midnight() * 1000 + (utc.nanosecond() % 1_000_000_000) / 1_000_000;
        f64::from(millis) / MILLIS_PER_DAY - 0.5
    } else {
        -0.5
    };
    J2000 + f64::from(days) + fraction
}

/// Days elapsed since J2000.0 for the UTC day containing `date_time`, shifted to Terrestrial Time.
pub fn current_julian_day<Tz: TimeZone>(date_time: &DateTime<Tz>) -> f64 {
    julian_date(date_time, true).floor() - J2000 + TT_OFFSET_DAYS
}

/// Julian century (T) from the given Julian date, measured since the J2000.0 epoch.
pub fn julian_century(julian_date: f64) -> f64 {
    (julian_date - J2000) / DAYS_PER_CENTURY
}

/// Ordinal day of the year (1 = January 1st) of the UTC calendar date containing `julian_date`.
///
/// # Errors
///
/// [`SunriseError::TimeConversionError`] when the date is outside chrono's range.
pub fn day_of_year(julian_date: f64) -> Result<u32, SunriseError> {
    DateTime::from_timestamp_millis(julian_day_to_unix_millis(julian_date))
        .map(|dt| dt.ordinal())
        .ok_or(SunriseError::TimeConversionError)
}

/// The UTC midnight that [`julian_date`] anchors to in midnight mode.
pub(crate) fn utc_midnight<Tz: TimeZone>(date_time: &DateTime<Tz>) -> DateTime<Utc> {
    date_time.naive_utc().date().and_time(NaiveTime::default()).and_utc()
}

/// Offsets `anchor` by `delta`, mapping any overflow to a conversion error.
pub(crate) fn offset_by(
    anchor: DateTime<Utc>,
    delta: Option<TimeDelta>,
) -> Result<DateTime<Utc>, SunriseError> {
    delta
        .and_then(|delta| anchor.checked_add_signed(delta))
        .ok_or(SunriseError::TimeConversionError)
}
