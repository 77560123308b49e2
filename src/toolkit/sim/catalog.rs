//! # Virtual kernel catalog
//!
//! The simulated toolkit has no filesystem: each "file" it can load is an
//! entry of a [`KernelCatalog`], keyed by path. Entries describe what a real
//! kernel of that kind would contribute to the kernel pool.
//!
//! ## Kernel kinds
//!
//! | Variant                          | Real-world analogue       |
//! |----------------------------------|---------------------------|
//! | [`VirtualKernel::Trajectory`]    | SPK (`.bsp`)              |
//! | [`VirtualKernel::LeapSeconds`]   | LSK (`.tls`)              |
//! | [`VirtualKernel::Orientation`]   | text PCK (`.tpc`)         |
//! | [`VirtualKernel::BodyNames`]     | text kernel (`.tk`) with `NAIF_BODY_NAME` / `NAIF_BODY_CODE` |
//!
//! ## See also
//! * [`KernelCatalog::solar_system`] – Ready-made catalog used by tests and demos.
use std::collections::HashMap;

use nalgebra::Vector3;

use crate::constants::{EphemerisTime, NaifId, ET_1950, ET_2050};

use super::conic::ConicOrbit;

/// How a segment's target moves relative to its center.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Two-body conic motion
    Conic(ConicOrbit),
    /// Constant offset from the center (km), zero velocity
    Fixed(Vector3<f64>),
}

impl Motion {
    pub(crate) fn state_at(&self, et: EphemerisTime) -> (Vector3<f64>, Vector3<f64>) {
        match self {
            Motion::Conic(orbit) => orbit.state_at(et),
            Motion::Fixed(offset) => (*offset, Vector3::zeros()),
        }
    }
}

/// One trajectory segment: `target` relative to `center` over `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub target: NaifId,
    pub center: NaifId,
    pub start: EphemerisTime,
    pub end: EphemerisTime,
    pub motion: Motion,
}

impl Segment {
    pub fn new(
        target: NaifId,
        center: NaifId,
        start: EphemerisTime,
        end: EphemerisTime,
        motion: Motion,
    ) -> Self {
        Segment {
            target,
            center,
            start,
            end,
            motion,
        }
    }

    pub fn covers(&self, et: EphemerisTime) -> bool {
        self.start <= et && et <= self.end
    }
}

/// Content of a virtual kernel file.
#[derive(Debug, Clone, PartialEq)]
pub enum VirtualKernel {
    Trajectory(Vec<Segment>),
    LeapSeconds,
    Orientation,
    BodyNames(Vec<(String, NaifId)>),
}

impl VirtualKernel {
    pub(crate) fn segments(&self) -> &[Segment] {
        match self {
            VirtualKernel::Trajectory(segments) => segments,
            _ => &[],
        }
    }
}

/// Path → virtual kernel map standing in for the filesystem.
#[derive(Debug, Clone, Default)]
pub struct KernelCatalog {
    files: HashMap<String, VirtualKernel>,
}

impl KernelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a file.
    pub fn with_file(mut self, path: impl Into<String>, kernel: VirtualKernel) -> Self {
        self.insert(path, kernel);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, kernel: VirtualKernel) {
        self.files.insert(path.into(), kernel);
    }

    pub fn get(&self, path: &str) -> Option<&VirtualKernel> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Planetary catalog rooted at `dir`:
    ///
    /// * `de432s.bsp` – barycenters 1..9 and the Sun about the SSB, Mercury,
    ///   Venus and Mars about their barycenters, Earth and Moon about the
    ///   Earth-Moon barycenter; coverage 1950-01-01 → 2050-01-01 TDB.
    /// * `naif0012.tls` – leap seconds.
    /// * `pck00010.tpc` – orientation constants (IAU_EARTH, IAU_MARS).
    /// * `extra_bodies.tk` – extra name bindings (`GATEWAY` → -60000).
    pub fn solar_system(dir: &str) -> Self {
        let dir = dir.trim_end_matches('/');
        KernelCatalog::new()
            .with_file(
                format!("{dir}/de432s.bsp"),
                VirtualKernel::Trajectory(planetary_segments(ET_1950, ET_2050)),
            )
            .with_file(format!("{dir}/naif0012.tls"), VirtualKernel::LeapSeconds)
            .with_file(format!("{dir}/pck00010.tpc"), VirtualKernel::Orientation)
            .with_file(
                format!("{dir}/extra_bodies.tk"),
                VirtualKernel::BodyNames(vec![("GATEWAY".into(), -60000)]),
            )
    }
}

/// Mean planetary elements at J2000 (a [AU], e, I, L, ϖ, Ω [deg]),
/// Standish, "Keplerian Elements for Approximate Positions of the Major Planets".
const PLANET_ELEMENTS: [(NaifId, [f64; 6]); 9] = [
    (1, [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593]),
    (2, [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255]),
    (3, [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0]),
    (4, [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891]),
    (5, [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909]),
    (6, [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448]),
    (7, [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503]),
    (8, [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574]),
    (9, [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684]),
];

/// Lunar orbit about the Earth-Moon barycenter and the Earth's counter-orbit.
fn earth_moon_pair() -> (ConicOrbit, ConicOrbit) {
    use crate::constants::{RADEG, SECONDS_PER_DAY};

    let moon = ConicOrbit {
        reference_epoch: 0.0,
        semi_major_axis: 379_730.0,
        eccentricity: 0.0549,
        inclination: 5.145 * RADEG,
        ascending_node_longitude: 125.08 * RADEG,
        periapsis_argument: 318.15 * RADEG,
        mean_anomaly: 135.27 * RADEG,
        mean_motion: crate::constants::DPI / (27.321_661 * SECONDS_PER_DAY),
    };
    let earth = ConicOrbit {
        semi_major_axis: 4_671.0,
        mean_anomaly: moon.mean_anomaly + std::f64::consts::PI,
        ..moon.clone()
    };
    (earth, moon)
}

fn planetary_segments(start: EphemerisTime, end: EphemerisTime) -> Vec<Segment> {
    let mut segments: Vec<Segment> = PLANET_ELEMENTS
        .iter()
        .map(|(id, [a, e, i, l, peri, node])| {
            Segment::new(
                *id,
                0,
                start,
                end,
                Motion::Conic(ConicOrbit::heliocentric(*a, *e, *i, *l, *peri, *node)),
            )
        })
        .collect();

    let (earth, moon) = earth_moon_pair();
    segments.extend([
        Segment::new(10, 0, start, end, Motion::Fixed(Vector3::zeros())),
        Segment::new(199, 1, start, end, Motion::Fixed(Vector3::zeros())),
        Segment::new(299, 2, start, end, Motion::Fixed(Vector3::zeros())),
        Segment::new(399, 3, start, end, Motion::Conic(earth)),
        Segment::new(301, 3, start, end, Motion::Conic(moon)),
        Segment::new(499, 4, start, end, Motion::Fixed(Vector3::zeros())),
    ]);
    segments
}
