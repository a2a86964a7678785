//! Low-precision solar ephemeris.
//!
//! Every function takes the Julian century `t` (see [`crate::julian_century`]) and returns
//! one link of the chain that ends in the solar declination and the equation of time.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::polynomial;
use crate::Angle;

/// Geometric mean longitude of the sun, normalized to [0, 360).
pub fn geom_mean_long_sun(t: f64) -> Angle {
    Angle::from_degrees(polynomial(&[280.466_46, 36_000.769_83, 0.000_303_2], t)).simplify()
}

/// Geometric mean anomaly of the sun.
pub fn geom_mean_anomaly_sun(t: f64) -> Angle {
    Angle::from_degrees(polynomial(&[357.529_11, 35_999.050_29, -0.000_153_7], t))
}

/// Eccentricity of Earth's orbit (unitless).
pub fn eccentricity_earth_orbit(t: f64) -> f64 {
    polynomial(&[0.016_708_634, -0.000_042_037, -0.000_000_126_7], t)
}

/// Equation of center: the three-term sine series in the mean anomaly.
pub fn sun_eq_of_center(t: f64) -> Angle {
    let m = geom_mean_anomaly_sun(t);
    Angle::from_degrees(
        m.sin() * polynomial(&[1.914_602, -0.004_817, -0.000_014], t)
            + (m * 2.0).sin() * polynomial(&[0.019_993, -0.000_101], t)
            + (m * 3.0).sin() * 0.000_289,
    )
}

pub fn sun_true_long(t: f64) -> Angle {
    geom_mean_long_sun(t) + sun_eq_of_center(t)
}

/// Longitude of the moon's ascending node, driving nutation.
fn omega(t: f64) -> Angle {
    Angle::from_degrees(125.04 - 1934.136 * t)
}

/// True longitude corrected for nutation and aberration.
pub fn sun_apparent_long(t: f64) -> Angle {
    sun_true_long(t) - Angle::from_degrees(0.005_69) - Angle::from_degrees(0.004_78 * omega(t).sin())
}

/// Mean obliquity of the ecliptic.
pub fn mean_obliquity_of_ecliptic(t: f64) -> Angle {
    let seconds = polynomial(&[21.448, -46.815, -0.000_59, 0.001_813], t);
    Angle::from_dms(23.0, 26.0, seconds)
}

/// Mean obliquity plus the nutation term in `cos(Ω)`.
pub fn obliquity_correction(t: f64) -> Angle {
    mean_obliquity_of_ecliptic(t) + Angle::from_degrees(0.002_56 * omega(t).cos())
}

/// Solar declination.
///
/// # Returns
///
/// The declination, or [`Angle::NAN`] if rounding pushes `sin(ε)·sin(λ)` past ±1.
pub fn sun_declination(t: f64) -> Angle {
    Angle::asin(obliquity_correction(t).sin() * sun_apparent_long(t).sin())
}

/// Equation of time in minutes of clock time (apparent minus mean solar time).
///
/// # Arguments
///
/// * `t` - Julian century since J2000.0
///
/// # Returns
///
/// Minutes to add to mean solar time to obtain sundial time, roughly within ±17.
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t);
    let l0 = geom_mean_long_sun(t);
    let e = eccentricity_earth_orbit(t);
    let m = geom_mean_anomaly_sun(t);

    let y = (epsilon / 2.0).tan().powi(2);
    let sin2l0 = (l0 * 2.0).sin();
    let sin_m = m.sin();
    let cos2l0 = (l0 * 2.0).cos();
    let sin4l0 = (l0 * 4.0).sin();
    let sin2m = (m * 2.0).sin();

    let radians = y * sin2l0 - 2.0 * e * sin_m + 4.0 * e * y * sin_m * cos2l0
        - 0.5 * y * y * sin4l0
        - 1.25 * e * e * sin2m;
    Angle::from_radians(radians).degrees() * 4.0
}
