//! Sunrise, sunset and solar noon solvers.
//!
//! All minute values are offsets from the UTC midnight of the anchor Julian date and may be
//! negative or exceed a day when the event falls on a neighbouring day.

use chrono::{DateTime, TimeDelta, TimeZone};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use tracing::{debug, trace, warn};

use crate::config::{Horizon, SolverConfig};
use crate::moon::moon_phase;
use crate::solar::{equation_of_time, sun_declination};
use crate::time::{day_of_year, julian_century, julian_date, offset_by, utc_midnight, MINUTES_PER_DAY};
use crate::{Angle, DaylightType, SunriseDetails, SunriseError};

/// Two successive estimates closer than this (one second, in minutes) have converged.
const CONVERGENCE_MINUTES: f64 = 1.0 / 60.0;

/// Beyond this latitude the season, not the anchor day's geometry, decides the regime.
const POLAR_CIRCLE_DEGREES: f64 = 66.4;

/// Halvings of a one-day interval; 40 reach well below a millisecond.
const BISECTION_STEPS: usize = 40;

/// Argument of the hour-angle arccosine. Outside `[-1, 1]` the sun never reaches `zenith`.
fn hour_angle_cosine(latitude: Angle, declination: Angle, zenith: Angle) -> f64 {
    zenith.cos() / (latitude.cos() * declination.cos()) - latitude.tan() * declination.tan()
}

/// Hour angle of sunrise for the official 90°50′ zenith.
///
/// # Arguments
///
/// * `latitude` - Observer latitude
/// * `declination` - Solar declination
///
/// # Returns
///
/// The hour angle, or [`Angle::NAN`] on days the sun does not cross the horizon.
pub fn hour_angle_sunrise(latitude: Angle, declination: Angle) -> Angle {
    hour_angle(latitude, declination, Horizon::Official.zenith())
}

/// Hour angle at which the sun's centre reaches `zenith`.
pub fn hour_angle(latitude: Angle, declination: Angle, zenith: Angle) -> Angle {
    Angle::acos(hour_angle_cosine(latitude, declination, zenith))
}

/// Raw sunrise (`rise = true`) or sunset, in minutes after UTC midnight of `julian_date`.
///
/// The solar position is evaluated once at `julian_date` itself. Returns NaN when the sun
/// does not cross the horizon on that day.
pub fn sunrise_set_utc(rise: bool, julian_date: f64, latitude: Angle, longitude: Angle) -> f64 {
    raw_event(rise, julian_date, latitude, longitude, Horizon::Official.zenith())
}

fn raw_event(rise: bool, julian_date: f64, latitude: Angle, longitude: Angle, zenith: Angle) -> f64 {
    let t = julian_century(julian_date);
    let eq_time = equation_of_time(t);
    let declination = sun_declination(t);
    let ha = hour_angle(latitude, declination, zenith);
    let ha = if rise { ha } else { -ha };
    720.0 - 4.0 * (longitude + ha).degrees() - eq_time
}

/// One fixed-point step from the day anchor: solve at `anchor`, then again at the estimate.
fn estimate(rise: bool, anchor: f64, latitude: Angle, longitude: Angle, zenith: Angle) -> f64 {
    let first = raw_event(rise, anchor, latitude, longitude, zenith);
    if first.is_nan() {
        return first;
    }
    raw_event(rise, anchor + first / MINUTES_PER_DAY, latitude, longitude, zenith)
}

/// Sunrise or sunset converged to within a second, classified by daylight regime.
///
/// Uses the default [`SolverConfig`].
///
/// # Errors
///
/// [`SunriseError::NoEventFound`] when no crossing exists within the search window.
pub fn refined_sunrise_set_utc(
    rise: bool,
    julian_date: f64,
    latitude: Angle,
    longitude: Angle,
) -> Result<(f64, DaylightType), SunriseError> {
    refined_sunrise_set_utc_with_config(rise, julian_date, latitude, longitude, &SolverConfig::default())
}

/// Sunrise or sunset converged to within a second, classified by daylight regime.
///
/// On a normal day the estimate is iterated until two successive values agree within one
/// second or `max_refinements` is reached. When the sun does not cross the horizon the
/// solver steps whole days toward the nearest crossing and reports its offset from the
/// original midnight along with [`DaylightType::PolarNight`] or [`DaylightType::MidnightSun`].
/// Near the poles, where the sun can cross the horizon between two midnights without any
/// whole day having a solution, the crossing instant is bisected between those days.
///
/// # Arguments
///
/// * `rise` - `true` for sunrise, `false` for sunset
/// * `julian_date` - Julian date of a UTC midnight
/// * `latitude`, `longitude` - Observer position, east positive
/// * `config` - Horizon and iteration limits
///
/// # Errors
///
/// Returns [`SunriseError::NoEventFound`] when `max_search_days` pass without a crossing, or a
/// configuration error when `config` does not validate.
#[tracing::instrument(level = "trace", skip(config))]
pub fn refined_sunrise_set_utc_with_config(
    rise: bool,
    julian_date: f64,
    latitude: Angle,
    longitude: Angle,
    config: &SolverConfig,
) -> Result<(f64, DaylightType), SunriseError> {
    config.validate()?;
    let zenith = config.horizon().zenith();

    let mut minutes = estimate(rise, julian_date, latitude, longitude, zenith);
    if minutes.is_nan() {
        return search_nearest_event(rise, julian_date, latitude, longitude, zenith, config);
    }
    for iteration in 0..config.max_refinements() {
        let next = raw_event(rise, julian_date + minutes / MINUTES_PER_DAY, latitude, longitude, zenith);
        if next.is_nan() {
            return search_nearest_event(rise, julian_date, latitude, longitude, zenith, config);
        }
        let delta = (next - minutes).abs();
        trace!(iteration, minutes = next, delta, "refined estimate");
        minutes = next;
        if delta < CONVERGENCE_MINUTES {
            break;
        }
    }
    Ok((minutes, DaylightType::Normal))
}

/// Regime of a day without a crossing at `julian_date`.
fn classify(julian_date: f64, latitude: Angle, zenith: Angle) -> Result<DaylightType, SunriseError> {
    let lat = latitude.degrees();
    if lat.abs() > POLAR_CIRCLE_DEGREES {
        let doy = day_of_year(julian_date)?;
        let summer = if lat > 0.0 {
            doy > 79 && doy < 267
        } else {
            doy < 83 || doy > 263
        };
        return Ok(if summer {
            DaylightType::MidnightSun
        } else {
            DaylightType::PolarNight
        });
    }
    let t = julian_century(julian_date);
    let cosine = hour_angle_cosine(latitude, sun_declination(t), zenith);
    Ok(if cosine < 0.0 {
        DaylightType::MidnightSun
    } else {
        DaylightType::PolarNight
    })
}

fn search_nearest_event(
    rise: bool,
    julian_date: f64,
    latitude: Angle,
    longitude: Angle,
    zenith: Angle,
    config: &SolverConfig,
) -> Result<(f64, DaylightType), SunriseError> {
    let regime = classify(julian_date, latitude, zenith)?;
    // Polar night: the next sunrise and the previous sunset. Midnight sun: the reverse.
    let step = match (regime, rise) {
        (DaylightType::MidnightSun, true) | (DaylightType::PolarNight, false) => -1.0,
        _ => 1.0,
    };
    debug!(latitude = latitude.degrees(), %regime, step, "no crossing on anchor day, searching");

    let cosine_at = |jd: f64| hour_angle_cosine(latitude, sun_declination(julian_century(jd)), zenith);
    let mut previous = (julian_date, cosine_at(julian_date));
    for day in 1..=config.max_search_days() {
        let offset = step * f64::from(day);
        let day_jd = julian_date + offset;
        let minutes = estimate(rise, day_jd, latitude, longitude, zenith);
        if minutes.is_finite() {
            debug!(offset, minutes, "crossing found");
            return Ok((offset * MINUTES_PER_DAY + minutes, regime));
        }
        // Close to the poles the band of days with a crossing is shorter than one step.
        let cosine = cosine_at(day_jd);
        if (previous.1 > 0.0) != (cosine > 0.0) {
            if let Some(crossing) = horizon_crossing(rise, previous.0, day_jd, cosine_at) {
                debug!(offset, crossing, "crossing found between whole days");
                return Ok(((crossing - julian_date) * MINUTES_PER_DAY, regime));
            }
        }
        previous = (day_jd, cosine);
    }
    warn!(
        days = config.max_search_days(),
        latitude = latitude.degrees(),
        "no crossing within search window"
    );
    Err(SunriseError::NoEventFound {
        days: config.max_search_days(),
    })
}

/// Bisects the Julian date between `a` and `b` at which the sun passes from below the
/// horizon to above it (`rise`) or back.
///
/// # Returns
///
/// The crossing, or `None` when the interval holds the opposite transition.
fn horizon_crossing(rise: bool, a: f64, b: f64, cosine_at: impl Fn(f64) -> f64) -> Option<f64> {
    let (mut earlier, mut later) = if a < b { (a, b) } else { (b, a) };
    let night_first = cosine_at(earlier) > 0.0;
    if night_first != rise {
        return None;
    }
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (earlier + later);
        if (cosine_at(mid) > 0.0) == night_first {
            earlier = mid;
        } else {
            later = mid;
        }
    }
    Some(earlier)
}

/// Solar noon in minutes after UTC midnight of `julian_date`.
pub fn solar_noon_utc(julian_date: f64, longitude: Angle) -> f64 {
    solar_noon_utc_with_config(julian_date, longitude, &SolverConfig::default())
}

/// Solar noon in minutes after UTC midnight of `julian_date`, iterated at most
/// `max_refinements` times.
pub fn solar_noon_utc_with_config(julian_date: f64, longitude: Angle, config: &SolverConfig) -> f64 {
    let mean_noon = 720.0 - 4.0 * longitude.degrees();
    let seed = julian_century(julian_date - longitude.degrees() / 360.0);
    let mut minutes = mean_noon - equation_of_time(seed);
    for _ in 0..config.max_refinements() {
        let t = julian_century(julian_date + minutes / MINUTES_PER_DAY);
        let next = mean_noon - equation_of_time(t);
        let delta = (next - minutes).abs();
        minutes = next;
        if delta < CONVERGENCE_MINUTES {
            break;
        }
    }
    minutes
}

fn whole_seconds(minutes: f64) -> Option<TimeDelta> {
    TimeDelta::try_seconds((minutes * 60.0) as i64)
}

fn whole_milliseconds(minutes: f64) -> Option<TimeDelta> {
    TimeDelta::try_milliseconds((minutes * 60_000.0) as i64)
}

/// Sunrise or sunset instant and its regime for the UTC day containing `date_time`,
/// expressed in `zone`.
pub(crate) fn event_in<Tz: TimeZone, Z: TimeZone>(
    rise: bool,
    date_time: &DateTime<Tz>,
    latitude: Angle,
    longitude: Angle,
    zone: &Z,
    config: &SolverConfig,
) -> Result<(DateTime<Z>, DaylightType), SunriseError> {
    let anchor = julian_date(date_time, false);
    let (minutes, kind) = refined_sunrise_set_utc_with_config(rise, anchor, latitude, longitude, config)?;
    let instant = offset_by(utc_midnight(date_time), whole_seconds(minutes))?;
    Ok((instant.with_timezone(zone), kind))
}

/// Sunrise (`rise = true`) or sunset for the UTC day of `date_time`, in the caller's zone.
///
/// On polar days the nearest event on another day is returned; use [`sunrise_details`]
/// for the classification.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use sunrise_calculator::{sunrise_set_time, Angle};
///
/// let paris = FixedOffset::east_opt(3600).unwrap();
/// let dt = paris.with_ymd_and_hms(2023, 1, 1, 10, 15, 30).unwrap();
/// let sunrise = sunrise_set_time(true, &dt, Angle::from_degrees(48.8566), Angle::from_degrees(2.3522)).unwrap();
/// assert_eq!(sunrise.to_rfc3339(), "2023-01-01T08:44:03+01:00");
/// ```
///
/// # Errors
///
/// [`SunriseError::NoEventFound`] or [`SunriseError::TimeConversionError`].
pub fn sunrise_set_time<Tz: TimeZone>(
    rise: bool,
    date_time: &DateTime<Tz>,
    latitude: Angle,
    longitude: Angle,
) -> Result<DateTime<Tz>, SunriseError> {
    let zone = date_time.timezone();
    event_in(rise, date_time, latitude, longitude, &zone, &SolverConfig::default()).map(|(time, _)| time)
}

/// Like [`sunrise_set_time`], but the result is expressed in `zone`.
pub fn sunrise_set_time_in<Tz: TimeZone, Z: TimeZone>(
    rise: bool,
    date_time: &DateTime<Tz>,
    latitude: Angle,
    longitude: Angle,
    zone: &Z,
) -> Result<DateTime<Z>, SunriseError> {
    event_in(rise, date_time, latitude, longitude, zone, &SolverConfig::default()).map(|(time, _)| time)
}

/// Solar noon for the UTC day of `date_time`, in the caller's zone, with millisecond resolution.
///
/// # Errors
///
/// [`SunriseError::TimeConversionError`] when the result leaves chrono's range.
pub fn solar_noon_time<Tz: TimeZone>(date_time: &DateTime<Tz>, longitude: Angle) -> Result<DateTime<Tz>, SunriseError> {
    solar_noon_in(date_time, longitude, &date_time.timezone(), &SolverConfig::default())
}

pub(crate) fn solar_noon_in<Tz: TimeZone, Z: TimeZone>(
    date_time: &DateTime<Tz>,
    longitude: Angle,
    zone: &Z,
    config: &SolverConfig,
) -> Result<DateTime<Z>, SunriseError> {
    let minutes = solar_noon_utc_with_config(julian_date(date_time, false), longitude, config);
    let instant = offset_by(utc_midnight(date_time), whole_milliseconds(minutes))?;
    Ok(instant.with_timezone(zone))
}

/// Sunrise, sunset, solar noon, their classifications and the moon phase for one query.
///
/// # Errors
///
/// See [`sunrise_set_time`].
pub fn sunrise_details<Tz: TimeZone>(
    date_time: &DateTime<Tz>,
    longitude: Angle,
    latitude: Angle,
) -> Result<SunriseDetails<Tz>, SunriseError> {
    sunrise_details_with_config(date_time, longitude, latitude, &SolverConfig::default())
}

/// [`sunrise_details`] with an explicit solver configuration.
pub fn sunrise_details_with_config<Tz: TimeZone>(
    date_time: &DateTime<Tz>,
    longitude: Angle,
    latitude: Angle,
    config: &SolverConfig,
) -> Result<SunriseDetails<Tz>, SunriseError> {
    let zone = date_time.timezone();
    let (sunrise_time, sunrise_type) = event_in(true, date_time, latitude, longitude, &zone, config)?;
    let (sunset_time, sunset_type) = event_in(false, date_time, latitude, longitude, &zone, config)?;
    Ok(SunriseDetails {
        sunrise_type,
        sunset_type,
        solar_noon_time: solar_noon_in(date_time, longitude, &zone, config)?,
        sunrise_time,
        sunset_time,
        moon_phase: moon_phase(date_time),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
    use super::*;

    fn deg(value: f64) -> Angle {
        Angle::from_degrees(value)
    }

    #[test]
    fn hour_angle_at_equinox() {
        let ha = hour_angle_sunrise(deg(52.4862), deg(0.0));
        assert!((ha.degrees() - 91.368_55).abs() < 1e-4);
    }

    #[test]
    fn hour_angle_is_nan_beyond_polar_circle() {
        assert!(hour_angle_sunrise(deg(70.0), deg(23.44)).is_nan());
        assert!(hour_angle_sunrise(deg(70.0), deg(-23.44)).is_nan());
        assert!((hour_angle_cosine(deg(70.0), deg(23.44), Horizon::Official.zenith()) + 1.2376).abs() < 1e-4);
        assert!((hour_angle_cosine(deg(70.0), deg(-23.44), Horizon::Official.zenith()) - 1.1449).abs() < 1e-4);
    }

    #[test]
    fn raw_solution_at_equator() {
        let rise = sunrise_set_utc(true, 2_451_544.5, deg(0.0), deg(0.0));
        let set = sunrise_set_utc(false, 2_451_544.5, deg(0.0), deg(0.0));
        assert!((rise - 359.441).abs() < 1e-3);
        assert!((set - 1086.687_3).abs() < 1e-3);
    }

    #[test]
    fn refined_solution_at_equator() {
        let (rise, kind) = refined_sunrise_set_utc(true, 2_451_544.5, deg(0.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::Normal);
        assert!((rise - 359.560_1).abs() < 1e-3);
        let (set, _) = refined_sunrise_set_utc(false, 2_451_544.5, deg(0.0), deg(0.0)).unwrap();
        assert!((set - 1087.043_2).abs() < 1e-3);
    }

    #[test]
    fn polar_night_searches_forward_for_sunrise() {
        let (rise, kind) = refined_sunrise_set_utc(true, -5.0, deg(70.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::PolarNight);
        assert_eq!(rise as i64, 88_547);
        let (set, kind) = refined_sunrise_set_utc(false, -5.0, deg(70.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::PolarNight);
        assert_eq!(set as i64, -691);
    }

    #[test]
    fn search_cap_is_reported() {
        let config = SolverConfig::new().with_max_search_days(3);
        let err = refined_sunrise_set_utc_with_config(true, 2_459_945.5, deg(88.0), deg(0.0), &config).unwrap_err();
        assert_eq!(err, SunriseError::NoEventFound { days: 3 });
    }

    #[test]
    fn poles_find_an_event_on_every_day_of_the_year() {
        for latitude in [89.9, 90.0, -90.0] {
            for day in 0..366 {
                let jd = 2_459_945.5 + f64::from(day);
                for rise in [true, false] {
                    let result = refined_sunrise_set_utc(rise, jd, deg(latitude), deg(0.0));
                    assert!(result.is_ok(), "lat {latitude} day {day} rise {rise}: {result:?}");
                }
            }
        }
    }

    #[test]
    fn pole_events_sit_on_the_horizon_crossing() {
        let zenith = Horizon::Official.zenith();
        for latitude in [90.0, -90.0] {
            for day in (0..366).step_by(7) {
                let jd = 2_459_945.5 + f64::from(day);
                for rise in [true, false] {
                    let (minutes, kind) = refined_sunrise_set_utc(rise, jd, deg(latitude), deg(0.0)).unwrap();
                    assert_ne!(kind, DaylightType::Normal);
                    let at = jd + minutes / MINUTES_PER_DAY;
                    let night =
                        |t: f64| hour_angle_cosine(deg(latitude), sun_declination(julian_century(t)), zenith) > 0.0;
                    // Night before a sunrise and after a sunset.
                    assert_eq!(night(at - 1e-3), rise, "lat {latitude} day {day} rise {rise}");
                    assert_eq!(night(at + 1e-3), !rise, "lat {latitude} day {day} rise {rise}");
                }
            }
        }
    }

    #[test]
    fn north_pole_new_year() {
        let (rise, kind) = refined_sunrise_set_utc(true, 2_459_945.5, deg(90.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::PolarNight);
        assert!((rise - 110_562.0).abs() < 2.0);
        let (set, kind) = refined_sunrise_set_utc(false, 2_459_945.5, deg(90.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::PolarNight);
        assert!((set + 140_854.0).abs() < 2.0);

        let (rise, kind) = refined_sunrise_set_utc(true, 2_459_945.5, deg(-90.0), deg(0.0)).unwrap();
        assert_eq!(kind, DaylightType::MidnightSun);
        assert!((rise + 147_021.0).abs() < 2.0);
        let (set, _) = refined_sunrise_set_utc(false, 2_459_945.5, deg(-90.0), deg(0.0)).unwrap();
        assert!((set - 116_636.0).abs() < 2.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SolverConfig::new().with_max_refinements(0);
        assert!(refined_sunrise_set_utc_with_config(true, 2_451_544.5, deg(0.0), deg(0.0), &config).is_err());
    }

    #[test]
    fn twilight_horizons_widen_the_night() {
        let official = refined_sunrise_set_utc(true, 2_460_116.5, deg(48.0), deg(0.0)).unwrap().0;
        let civil = refined_sunrise_set_utc_with_config(
            true,
            2_460_116.5,
            deg(48.0),
            deg(0.0),
            &SolverConfig::new().with_horizon(Horizon::Civil),
        )
        .unwrap()
        .0;
        assert!(civil < official);
        assert!(official - civil > 20.0 && official - civil < 60.0);
    }

    #[test]
    fn solar_noon_tracks_longitude() {
        let greenwich = solar_noon_utc(2_451_544.5, deg(0.0));
        let east = solar_noon_utc(2_451_544.5, deg(90.0));
        assert!((greenwich - 723.3).abs() < 0.5);
        assert!((greenwich - east - 360.0).abs() < 0.5);
    }
}
