//! Solver configuration.

use crate::{Angle, SunriseError};

/// Horizon the sun's centre is measured against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Horizon {
    /// Zenith 90°50′: 34′ of refraction plus 16′ of solar semi-diameter.
    #[default]
    Official,
    /// Zenith 96°, sun 6° below the horizon.
    Civil,
    /// Zenith 102°, sun 12° below the horizon.
    Nautical,
    /// Zenith 108°, sun 18° below the horizon.
    Astronomical,
    /// Arbitrary zenith angle.
    Custom(Angle),
}

impl Horizon {
    /// Zenith angle of the sun's centre at the event.
    pub fn zenith(self) -> Angle {
        match self {
            Horizon::Official => Angle::from_dms(90.0, 50.0, 0.0),
            Horizon::Civil => Angle::from_degrees(96.0),
            Horizon::Nautical => Angle::from_degrees(102.0),
            Horizon::Astronomical => Angle::from_degrees(108.0),
            Horizon::Custom(zenith) => zenith,
        }
    }
}

/// Limits and horizon for the sunrise, sunset and solar noon solvers.
///
/// # Example
///
/// ```
/// use sunrise_calculator::{Horizon, SolverConfig};
///
/// let config = SolverConfig::new()
///     .with_horizon(Horizon::Civil)
///     .with_max_search_days(200);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverConfig {
    horizon: Horizon,
    /// Upper bound on whole-day steps when no event occurs on the requested day.
    max_search_days: u32,
    /// Upper bound on fixed-point iterations.
    max_refinements: usize,
}

impl SolverConfig {
    /// Creates the default configuration.
    ///
    /// Defaults: `horizon = Official`, `max_search_days = 400`, `max_refinements = 4`.
    pub const fn new() -> Self {
        Self {
            horizon: Horizon::Official,
            max_search_days: 400,
            max_refinements: 4,
        }
    }

    /// Sets the horizon.
    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the day search cap.
    pub fn with_max_search_days(mut self, days: u32) -> Self {
        self.max_search_days = days;
        self
    }

    /// Sets the fixed-point iteration cap.
    pub fn with_max_refinements(mut self, refinements: usize) -> Self {
        self.max_refinements = refinements;
        self
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn max_search_days(&self) -> u32 {
        self.max_search_days
    }

    pub fn max_refinements(&self) -> usize {
        self.max_refinements
    }

    /// Validates this configuration.
    ///
    /// Returns an error if either cap is zero or the zenith is non-finite or outside (0°, 180°).
    pub fn validate(&self) -> Result<(), SunriseError> {
        if self.max_search_days < 1 {
            return Err(SunriseError::InvalidSearchDays {
                days: self.max_search_days,
            });
        }
        if self.max_refinements < 1 {
            return Err(SunriseError::InvalidRefinements {
                refinements: self.max_refinements,
            });
        }
        let zenith = self.horizon.zenith().degrees();
        if !zenith.is_finite() || zenith <= 0.0 || zenith >= 180.0 {
            return Err(SunriseError::InvalidZenith { degrees: zenith });
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
