//! # Two-body conic motion
//!
//! Closed elliptic orbits used as analytic trajectory segments by the
//! simulated toolkit. Elements are given in the **ecliptic J2000** plane and
//! states are produced in the **equatorial J2000** frame, the native frame of
//! trajectory kernels.
//!
//! ## Units
//!
//! - Lengths: **km**
//! - Angles: **radians**
//! - Mean motion: **rad/s**
//! - Epoch: **ET seconds** past J2000
use nalgebra::Vector3;

use crate::constants::{EphemerisTime, Kilometer, Radian, DPI, GM_SUN, OBLIQUITY_J2000, RADEG};

use super::orientation::rotmt;

/// Keplerian elements of a closed orbit.
///
/// Units
/// -----
/// * `semi_major_axis`: km.
/// * `eccentricity`: unitless, `0 <= e < 1`.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`,
///   `mean_anomaly`: radians, referred to the ecliptic J2000.
/// * `mean_motion`: rad/s.
/// * `reference_epoch`: ET seconds of `mean_anomaly`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicOrbit {
    pub reference_epoch: EphemerisTime,
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: Radian,
    pub mean_motion: f64,
}

/// Normalize an angle to `[0, 2π)`.
fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Solve Kepler's equation `E - e sin E = M` with Newton iterations.
fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let m = principal_angle(mean_anomaly);
    let mut e_anom = if ecc < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..50 {
        let f = e_anom - ecc * e_anom.sin() - m;
        let step = f / (1.0 - ecc * e_anom.cos());
        e_anom -= step;
        if step.abs() < 1e-14 {
            break;
        }
    }
    e_anom
}

impl ConicOrbit {
    /// Heliocentric orbit from the classical mean elements (AU, degrees) at J2000.
    ///
    /// Arguments
    /// -----------------
    /// * `a_au`: semi-major axis (AU).
    /// * `ecc`: eccentricity.
    /// * `incl_deg`: inclination (deg).
    /// * `mean_lon_deg`: mean longitude L (deg).
    /// * `peri_lon_deg`: longitude of perihelion ϖ (deg).
    /// * `node_deg`: longitude of the ascending node Ω (deg).
    ///
    /// Return
    /// ----------
    /// * A [`ConicOrbit`] whose mean motion follows from the solar GM.
    pub fn heliocentric(
        a_au: f64,
        ecc: f64,
        incl_deg: f64,
        mean_lon_deg: f64,
        peri_lon_deg: f64,
        node_deg: f64,
    ) -> Self {
        let a = a_au * crate::constants::AU;
        ConicOrbit {
            reference_epoch: 0.0,
            semi_major_axis: a,
            eccentricity: ecc,
            inclination: incl_deg * RADEG,
            ascending_node_longitude: node_deg * RADEG,
            periapsis_argument: (peri_lon_deg - node_deg) * RADEG,
            mean_anomaly: (mean_lon_deg - peri_lon_deg) * RADEG,
            mean_motion: (GM_SUN / (a * a * a)).sqrt(),
        }
    }

    /// Orbital period in seconds.
    pub fn period(&self) -> f64 {
        DPI / self.mean_motion
    }

    /// Position (km) and velocity (km/s) at `et`, equatorial J2000.
    pub fn state_at(&self, et: EphemerisTime) -> (Vector3<f64>, Vector3<f64>) {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let m = self.mean_anomaly + self.mean_motion * (et - self.reference_epoch);
        let ea = eccentric_anomaly(m, e);

        let (sin_e, cos_e) = ea.sin_cos();
        let sqrt_1me2 = (1.0 - e * e).sqrt();
        let e_dot = self.mean_motion / (1.0 - e * cos_e);

        // perifocal frame
        let pos = Vector3::new(a * (cos_e - e), a * sqrt_1me2 * sin_e, 0.0);
        let vel = Vector3::new(-a * sin_e * e_dot, a * sqrt_1me2 * cos_e * e_dot, 0.0);

        let to_ecliptic = rotmt(self.ascending_node_longitude, 2)
            * rotmt(self.inclination, 0)
            * rotmt(self.periapsis_argument, 2);
        let to_equatorial = rotmt(OBLIQUITY_J2000, 0) * to_ecliptic;

        (to_equatorial * pos, to_equatorial * vel)
    }
}
