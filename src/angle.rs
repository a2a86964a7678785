//! Angles stored in decimal degrees with angle-aware trigonometry.
//!
//! The inverse trigonometric constructors never fail: a ratio outside `[-1, 1]` yields
//! [`Angle::NAN`], which callers use as the "the sun never crosses the horizon" signal.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::normalize_degrees_360;

/// An immutable angle in decimal degrees.
///
/// `degrees()` and `radians()` always describe the same value. Arithmetic never normalizes
/// on its own; call [`Angle::simplify`] to map into `[0, 360)`.
///
/// # Example
///
/// ```
/// use sunrise_calculator::Angle;
///
/// let zenith = Angle::from_dms(90.0, 50.0, 0.0);
/// assert!((zenith.degrees() - 90.833_333).abs() < 1e-6);
/// assert_eq!(Angle::from_degrees(-30.0).simplify().degrees(), 330.0);
/// assert!(Angle::acos(1.5).is_nan());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// The undefined angle. Produced by [`Angle::asin`] and [`Angle::acos`] outside their domain.
    pub const NAN: Angle = Angle { degrees: f64::NAN };

    /// Builds an angle from decimal degrees.
    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    /// Builds an angle from degrees, arc minutes and arc seconds.
    ///
    /// The sign of `degrees` applies to the whole value, so `from_dms(-23.0, 26.0, 0.0)`
    /// is `-23.4333°`. Minutes and seconds are expected to be non-negative.
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
        Self {
            degrees: if degrees.is_sign_negative() { -magnitude } else { magnitude },
        }
    }

    /// Builds an angle from radians.
    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    /// Decimal degrees.
    pub const fn degrees(self) -> f64 {
        self.degrees
    }

    /// Radians.
    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }

    /// The same direction expressed in `[0, 360)` degrees. NaN stays NaN.
    pub fn simplify(self) -> Self {
        Self {
            degrees: normalize_degrees_360(self.degrees),
        }
    }

    /// Whether this is the undefined angle.
    pub fn is_nan(self) -> bool {
        self.degrees.is_nan()
    }

    pub fn sin(self) -> f64 {
        self.radians().sin()
    }

    pub fn cos(self) -> f64 {
        self.radians().cos()
    }

    pub fn tan(self) -> f64 {
        self.radians().tan()
    }

    /// Inverse sine of a dimensionless ratio.
    ///
    /// # Returns
    ///
    /// The angle in `[-90°, 90°]`, or [`Angle::NAN`] when `ratio` lies outside `[-1, 1]`
    /// or is itself NaN.
    pub fn asin(ratio: f64) -> Self {
        if (-1.0..=1.0).contains(&ratio) {
            Self::from_radians(ratio.asin())
        } else {
            Self::NAN
        }
    }

    /// Inverse cosine of a dimensionless ratio.
    ///
    /// # Returns
    ///
    /// The angle in `[0°, 180°]`, or [`Angle::NAN`] when `ratio` lies outside `[-1, 1]`
    /// or is itself NaN.
    pub fn acos(ratio: f64) -> Self {
        if (-1.0..=1.0).contains(&ratio) {
            Self::from_radians(ratio.acos())
        } else {
            Self::NAN
        }
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees + rhs.degrees)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees - rhs.degrees)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_degrees(-self.degrees)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::from_degrees(self.degrees * rhs)
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self * rhs.degrees)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle::from_degrees(self.degrees / rhs)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
    use super::*;

    #[test]
    fn degrees_and_radians_agree() {
        let a = Angle::from_degrees(180.0);
        assert!((a.radians() - core::f64::consts::PI).abs() < 1e-15);
        let b = Angle::from_radians(core::f64::consts::FRAC_PI_2);
        assert!((b.degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn dms_carries_sign_of_degrees() {
        assert!((Angle::from_dms(23.0, 26.0, 21.448).degrees() - 23.439_291_111).abs() < 1e-9);
        assert!((Angle::from_dms(-23.0, 30.0, 0.0).degrees() + 23.5).abs() < 1e-12);
        assert!((Angle::from_dms(-0.0, 30.0, 0.0).degrees() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn simplify_wraps_into_one_turn() {
        assert_eq!(Angle::from_degrees(360.0).simplify().degrees(), 0.0);
        assert_eq!(Angle::from_degrees(-90.0).simplify().degrees(), 270.0);
        assert!((Angle::from_degrees(725.5).simplify().degrees() - 5.5).abs() < 1e-12);
        assert!(Angle::NAN.simplify().is_nan());
    }

    #[test]
    fn simplify_keeps_trigonometric_identity() {
        let a = Angle::from_degrees(-1234.5);
        let s = a.simplify();
        assert!((a.sin() - s.sin()).abs() < 1e-12);
        assert!((a.cos() - s.cos()).abs() < 1e-12);
    }

    #[test]
    fn inverse_functions_signal_domain_failure() {
        assert!(Angle::asin(1.000_001).is_nan());
        assert!(Angle::acos(-1.2376).is_nan());
        assert!(Angle::acos(f64::NAN).is_nan());
        assert_eq!(Angle::acos(1.0).degrees(), 0.0);
        assert!((Angle::asin(-1.0).degrees() + 90.0).abs() < 1e-12);
    }

    #[test]
    fn arithmetic_operates_on_degrees() {
        let a = Angle::from_degrees(10.0);
        let b = Angle::from_degrees(2.5);
        assert_eq!((a + b).degrees(), 12.5);
        assert_eq!((a - b).degrees(), 7.5);
        assert_eq!((-a).degrees(), -10.0);
        assert_eq!((a * 2.0).degrees(), 20.0);
        assert_eq!((2.0 * a).degrees(), 20.0);
        assert_eq!((a / 4.0).degrees(), 2.5);
    }

    #[test]
    fn nan_propagates_through_arithmetic() {
        assert!((Angle::NAN + Angle::from_degrees(1.0)).is_nan());
        assert!(Angle::NAN.cos().is_nan());
    }
}
