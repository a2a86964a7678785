use core::fmt;

use chrono::{DateTime, TimeZone};
use thiserror::Error;

/// Daylight regime of a sunrise or sunset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DaylightType {
    /// The sun rises and sets on the requested day.
    Normal,
    /// The sun stays below the horizon; the reported event lies on another day.
    PolarNight,
    /// The sun stays above the horizon; the reported event lies on another day.
    MidnightSun,
}

impl DaylightType {
    /// Canonical upper-case name, e.g. `POLAR_NIGHT`.
    pub const fn as_str(self) -> &'static str {
        match self {
            DaylightType::Normal => "NORMAL",
            DaylightType::PolarNight => "POLAR_NIGHT",
            DaylightType::MidnightSun => "MIDNIGHT_SUN",
        }
    }
}

impl fmt::Display for DaylightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DaylightType {
    type Err = SunriseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(DaylightType::Normal),
            "POLAR_NIGHT" => Ok(DaylightType::PolarNight),
            "MIDNIGHT_SUN" => Ok(DaylightType::MidnightSun),
            _ => Err(SunriseError::UnknownDaylightType),
        }
    }
}

/// Everything known about one day at one place.
///
/// Sunrise and sunset carry independent classifications: near a regime change the last
/// `Normal` sunrise can share a day with a `MidnightSun` sunset.
#[derive(Clone, Debug, PartialEq)]
pub struct SunriseDetails<Tz: TimeZone> {
    pub sunrise_type: DaylightType,
    pub sunset_type: DaylightType,
    pub solar_noon_time: DateTime<Tz>,
    /// Sunrise, or the nearest sunrise on another day when `sunrise_type` is not `Normal`.
    pub sunrise_time: DateTime<Tz>,
    /// Sunset, or the nearest sunset on another day when `sunset_type` is not `Normal`.
    pub sunset_time: DateTime<Tz>,
    /// Fraction of the synodic month in `[0, 1)`, `0` at new moon.
    pub moon_phase: f64,
}

/// Errors that can occur during sunrise calculations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SunriseError {
    /// Latitude out of valid range [-90, 90] degrees
    #[error("Latitude out of range")]
    LatitudeOutOfRange,

    /// Longitude out of valid range [-180, 180] degrees
    #[error("Longitude out of range")]
    LongitudeOutOfRange,

    /// The day search found no horizon crossing
    #[error("No sunrise or sunset within {days} days")]
    NoEventFound { days: u32 },

    /// Error converting between time representations
    #[error("Time conversion error")]
    TimeConversionError,

    /// The day search must be allowed at least one day
    #[error("Search window of {days} days is invalid")]
    InvalidSearchDays { days: u32 },

    /// At least one fixed-point iteration is required
    #[error("Refinement count {refinements} is invalid")]
    InvalidRefinements { refinements: usize },

    /// Horizon zenith must be finite and strictly between 0 and 180 degrees
    #[error("Zenith of {degrees} degrees is invalid")]
    InvalidZenith { degrees: f64 },

    /// Unrecognised daylight type name
    #[error("Unknown daylight type")]
    UnknownDaylightType,
}
