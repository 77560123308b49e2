//! # Constants and type definitions for Orrery
//!
//! Physical constants, time anchors and the small type aliases shared by the
//! kernel registry, the query facade and the bundled toolkit.
//!
//! ## Overview
//!
//! - Identifiers: NAIF integer codes ([`NaifId`]) and the solar-system barycenter root
//! - Time: ephemeris time in seconds past J2000 ([`EphemerisTime`])
//! - Physics: speed of light, astronomical unit, solar gravitational parameter
//! - Engine limits: capacity of the per-file object enumeration

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// NAIF integer code of a celestial object (e.g. 3 for the Earth-Moon barycenter)
pub type NaifId = i32;

/// Seconds elapsed since J2000 (2000-01-01 12:00:00 TDB), the uniform scale of trajectory queries
pub type EphemerisTime = f64;

/// Distance in kilometers
pub type Kilometer = f64;

/// Duration in seconds
pub type Second = f64;

/// Angle in radians
pub type Radian = f64;

// -------------------------------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------------------------------

/// The solar-system barycenter, root of every trajectory chain. Always covered.
pub const SOLAR_SYSTEM_BARYCENTER: NaifId = 0;

/// Default number of object IDs enumerated per trajectory kernel
pub const MAX_OBJECT_IDS: usize = 500;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: Kilometer = 149_597_870.7;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Heliocentric gravitational constant in km³/s²
pub const GM_SUN: f64 = 1.327_124_400_18e11;

/// Mean obliquity of the ecliptic at J2000 (IAU 1976), in radians
pub const OBLIQUITY_J2000: Radian = 84_381.448 * RADSEC;

/// Ephemeris time of 1950-01-01 00:00:00 TDB
pub const ET_1950: EphemerisTime = -1_577_880_000.0;

/// Ephemeris time of 2050-01-01 00:00:00 TDB
pub const ET_2050: EphemerisTime = 1_577_880_000.0;
