//! # Sunrise Calculator
//!
//! Sunrise, sunset and solar noon for any place and day, with the daylight regime of each
//! event and the phase of the moon.
//!
//! Solar positions come from the low-precision NOAA-style ephemeris (mean longitude, mean
//! anomaly, equation of center, obliquity) with a fixed 90°50′ horizon. Inside the polar
//! circles, days without a sunrise or sunset are classified as polar night or midnight sun
//! and the nearest event on another day is reported instead.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use sunrise_calculator::{sunrise_details, Angle, DaylightType};
//!
//! let paris = FixedOffset::east_opt(3600).unwrap();
//! let dt = paris.with_ymd_and_hms(2023, 1, 1, 10, 15, 30).unwrap();
//!
//! let details = sunrise_details(&dt, Angle::from_degrees(2.3522), Angle::from_degrees(48.8566)).unwrap();
//! assert_eq!(details.sunrise_type, DaylightType::Normal);
//! assert_eq!(details.sunrise_time.to_rfc3339(), "2023-01-01T08:44:03+01:00");
//! assert_eq!(details.sunset_time.to_rfc3339(), "2023-01-01T17:04:11+01:00");
//! ```
//!
//! ## Polar regions
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use sunrise_calculator::{SunriseCalculator, DaylightType};
//!
//! let dt = FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2023, 1, 1, 10, 15, 30).unwrap();
//! let calc = SunriseCalculator::new(dt, 2.3522, 88.0).unwrap();
//!
//! let (next_sunrise, kind) = calc.get_sunrise().unwrap();
//! assert_eq!(kind, DaylightType::PolarNight);
//! assert_eq!(next_sunrise.to_rfc3339(), "2023-03-14T10:55:19+01:00");
//! ```
#![no_std]

mod angle;
mod config;
mod math;
mod moon;
mod solar;
mod sunrise;
mod time;
mod types;


use core::cell::OnceCell;

use chrono::{DateTime, TimeZone};

pub use crate::angle::Angle;
pub use crate::config::{Horizon, SolverConfig};
pub use crate::moon::{moon_phase, SYNODIC_MONTH};
pub use crate::solar::{
    eccentricity_earth_orbit, equation_of_time, geom_mean_anomaly_sun, geom_mean_long_sun, mean_obliquity_of_ecliptic,
    obliquity_correction, sun_apparent_long, sun_declination, sun_eq_of_center, sun_true_long,
};
pub use crate::sunrise::{
    hour_angle, hour_angle_sunrise, refined_sunrise_set_utc, refined_sunrise_set_utc_with_config, solar_noon_time,
    solar_noon_utc, solar_noon_utc_with_config, sunrise_details, sunrise_details_with_config, sunrise_set_time,
    sunrise_set_time_in, sunrise_set_utc,
};
pub use crate::time::{current_julian_day, day_of_year, julian_century, julian_date, DAYS_PER_CENTURY, J2000};
pub use crate::types::{DaylightType, SunriseDetails, SunriseError};

type Event<Tz> = Result<(DateTime<Tz>, DaylightType), SunriseError>;

/// Sunrise, sunset, solar noon and moon phase for one place and one day.
///
/// Inputs are validated once on construction and every result is computed lazily and
/// cached, so repeated accessors are free.
///
/// # Example
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Europe::London;
/// use sunrise_calculator::SunriseCalculator;
///
/// let dt = London.with_ymd_and_hms(2023, 6, 21, 12, 0, 0).unwrap();
/// let calc = SunriseCalculator::new(dt, -0.1278, 51.5074).unwrap();
///
/// let (sunrise, _) = calc.get_sunrise().unwrap();
/// assert_eq!(sunrise.to_rfc3339(), "2023-06-21T04:43:01+01:00");
/// ```
pub struct SunriseCalculator<Tz: TimeZone> {
    date_time: DateTime<Tz>,
    longitude: Angle,
    latitude: Angle,
    config: SolverConfig,
    julian_date: OnceCell<f64>,
    sunrise: OnceCell<Event<Tz>>,
    sunset: OnceCell<Event<Tz>>,
    solar_noon: OnceCell<Result<DateTime<Tz>, SunriseError>>,
    moon_phase: OnceCell<f64>,
}

impl<Tz: TimeZone> SunriseCalculator<Tz> {
    /// Creates a calculator with the default [`SolverConfig`].
    ///
    /// # Arguments
    ///
    /// * `date_time` - Any instant of the day of interest; its zone is used for the results
    /// * `longitude` - Longitude in degrees (positive East, negative West)
    /// * `latitude` - Latitude in degrees (positive North, negative South)
    ///
    /// # Errors
    ///
    /// [`SunriseError::LongitudeOutOfRange`] outside [-180, 180] and
    /// [`SunriseError::LatitudeOutOfRange`] outside [-90, 90]. NaN is rejected by both.
    pub fn new(date_time: DateTime<Tz>, longitude: f64, latitude: f64) -> Result<Self, SunriseError> {
        Self::with_config(date_time, longitude, latitude, SolverConfig::default())
    }

    /// Creates a calculator with an explicit solver configuration.
    ///
    /// # Errors
    ///
    /// Coordinate errors as for [`SunriseCalculator::new`], or the error returned by
    /// [`SolverConfig::validate`].
    pub fn with_config(
        date_time: DateTime<Tz>,
        longitude: f64,
        latitude: f64,
        config: SolverConfig,
    ) -> Result<Self, SunriseError> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SunriseError::LongitudeOutOfRange);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SunriseError::LatitudeOutOfRange);
        }
        config.validate()?;
        Ok(Self {
            date_time,
            longitude: Angle::from_degrees(longitude),
            latitude: Angle::from_degrees(latitude),
            config,
            julian_date: OnceCell::new(),
            sunrise: OnceCell::new(),
            sunset: OnceCell::new(),
            solar_noon: OnceCell::new(),
            moon_phase: OnceCell::new(),
        })
    }

    /// Julian date of the UTC midnight that anchors every solver.
    pub fn get_julian_date(&self) -> f64 {
        *self.julian_date.get_or_init(|| julian_date(&self.date_time, false))
    }

    /// Sunrise and its regime. On polar days this is the nearest sunrise on another day.
    pub fn get_sunrise(&self) -> Event<Tz> {
        self.sunrise.get_or_init(|| self.event(true)).clone()
    }

    /// Sunset and its regime. On polar days this is the nearest sunset on another day.
    pub fn get_sunset(&self) -> Event<Tz> {
        self.sunset.get_or_init(|| self.event(false)).clone()
    }

    /// Solar noon in the caller's zone, millisecond resolution.
    pub fn get_solar_noon(&self) -> Result<DateTime<Tz>, SunriseError> {
        self.solar_noon
            .get_or_init(|| {
                sunrise::solar_noon_in(&self.date_time, self.longitude, &self.date_time.timezone(), &self.config)
            })
            .clone()
    }

    /// Moon phase in [0, 1), `0` at new moon.
    pub fn get_moon_phase(&self) -> f64 {
        *self.moon_phase.get_or_init(|| moon_phase(&self.date_time))
    }

    /// All results as one [`SunriseDetails`].
    ///
    /// # Errors
    ///
    /// The first error among sunrise, sunset and solar noon.
    pub fn get_details(&self) -> Result<SunriseDetails<Tz>, SunriseError> {
        let (sunrise_time, sunrise_type) = self.get_sunrise()?;
        let (sunset_time, sunset_type) = self.get_sunset()?;
        Ok(SunriseDetails {
            sunrise_type,
            sunset_type,
            solar_noon_time: self.get_solar_noon()?,
            sunrise_time,
            sunset_time,
            moon_phase: self.get_moon_phase(),
        })
    }

    fn event(&self, rise: bool) -> Event<Tz> {
        sunrise::event_in(
            rise,
            &self.date_time,
            self.latitude,
            self.longitude,
            &self.date_time.timezone(),
            &self.config,
        )
    }
}
