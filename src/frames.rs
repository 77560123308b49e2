//! # Reference frames and aberration corrections
//!
//! Closed selectors mapped to the fixed string tokens understood by the
//! ephemeris toolkit. Both enums parse from and print as their token, so they
//! can be named in configuration files (`"ECLIPJ2000"`, `"LT+S"`).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::orrery_errors::OrreryError;

/// Output frame of a state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReferenceFrame {
    /// Earth mean equator and equinox of J2000 (ICRF-aligned)
    #[default]
    J2000,
    /// Mean ecliptic and equinox of J2000
    EclipJ2000,
    /// Earth body-fixed frame (IAU rotation model)
    IauEarth,
    /// Mars body-fixed frame (IAU rotation model)
    IauMars,
}

impl ReferenceFrame {
    pub const ALL: [ReferenceFrame; 4] = [
        ReferenceFrame::J2000,
        ReferenceFrame::EclipJ2000,
        ReferenceFrame::IauEarth,
        ReferenceFrame::IauMars,
    ];

    /// Toolkit token for this frame.
    pub fn token(&self) -> &'static str {
        match self {
            ReferenceFrame::J2000 => "J2000",
            ReferenceFrame::EclipJ2000 => "ECLIPJ2000",
            ReferenceFrame::IauEarth => "IAU_EARTH",
            ReferenceFrame::IauMars => "IAU_MARS",
        }
    }

    /// Whether the frame rotates with a body (needs orientation data).
    pub fn is_body_fixed(&self) -> bool {
        matches!(self, ReferenceFrame::IauEarth | ReferenceFrame::IauMars)
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ReferenceFrame {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|frame| frame.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OrreryError::InvalidConfig(format!("unknown reference frame: {s}")))
    }
}

impl TryFrom<String> for ReferenceFrame {
    type Error = OrreryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferenceFrame> for String {
    fn from(frame: ReferenceFrame) -> Self {
        frame.token().to_string()
    }
}

/// Aberration correction applied to the target's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AberrationCorrection {
    /// Geometric state
    #[default]
    None,
    /// One-way light time
    LightTime,
    /// One-way light time and stellar aberration
    LightTimeStellar,
}

impl AberrationCorrection {
    pub const ALL: [AberrationCorrection; 3] = [
        AberrationCorrection::None,
        AberrationCorrection::LightTime,
        AberrationCorrection::LightTimeStellar,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            AberrationCorrection::None => "NONE",
            AberrationCorrection::LightTime => "LT",
            AberrationCorrection::LightTimeStellar => "LT+S",
        }
    }
}

impl fmt::Display for AberrationCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AberrationCorrection {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL
            .into_iter()
            .find(|corr| corr.token().eq_ignore_ascii_case(&compact))
            .ok_or_else(|| {
                OrreryError::InvalidConfig(format!("unknown aberration correction: {s}"))
            })
    }
}

impl TryFrom<String> for AberrationCorrection {
    type Error = OrreryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AberrationCorrection> for String {
    fn from(corr: AberrationCorrection) -> Self {
        corr.token().to_string()
    }
}
