//! # State queries
//!
//! One query shape covers every call style: bodies by ID or by name, time as
//! a civil instant, a raw ephemeris epoch, or "now", with optional frame and
//! aberration overrides.
//!
//! ```rust
//! use hifitime::Epoch;
//! use orrery::frames::AberrationCorrection;
//! use orrery::query::StateQuery;
//!
//! let by_id = StateQuery::new(3, 0).at(0.0);
//! let by_name = StateQuery::new("Earth Barycenter", "Solar System Barycenter")
//!     .at(Epoch::from_gregorian_utc_at_noon(2024, 1, 1))
//!     .aberration(AberrationCorrection::LightTime);
//! # let _ = (by_id, by_name);
//! ```
use std::fmt;

use hifitime::Epoch;
use serde::Serialize;

use crate::{
    constants::{EphemerisTime, NaifId, Second},
    frames::{AberrationCorrection, ReferenceFrame},
    state_vector::StateVector,
};

/// A body given by NAIF ID or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRef {
    Id(NaifId),
    Name(String),
}

impl From<NaifId> for BodyRef {
    fn from(id: NaifId) -> Self {
        BodyRef::Id(id)
    }
}

impl From<&str> for BodyRef {
    fn from(name: &str) -> Self {
        BodyRef::Name(name.to_string())
    }
}

impl From<String> for BodyRef {
    fn from(name: String) -> Self {
        BodyRef::Name(name)
    }
}

impl fmt::Display for BodyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyRef::Id(id) => write!(f, "{id}"),
            BodyRef::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// When to evaluate a state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeRef {
    /// Civil instant, converted through the leap-second table
    Civil(Epoch),
    /// Ephemeris seconds past J2000, used as is
    Ephemeris(EphemerisTime),
    /// Wall-clock instant at evaluation time
    #[default]
    Now,
}

impl From<Epoch> for TimeRef {
    fn from(epoch: Epoch) -> Self {
        TimeRef::Civil(epoch)
    }
}

impl From<EphemerisTime> for TimeRef {
    fn from(et: EphemerisTime) -> Self {
        TimeRef::Ephemeris(et)
    }
}

/// Inputs of a state query; frame and aberration fall back to the
/// configuration defaults when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct StateQuery {
    target: BodyRef,
    reference: BodyRef,
    time: TimeRef,
    frame: Option<ReferenceFrame>,
    aberration: Option<AberrationCorrection>,
}

impl StateQuery {
    /// State of `target` relative to `reference`, now, with default frame and correction.
    pub fn new(target: impl Into<BodyRef>, reference: impl Into<BodyRef>) -> Self {
        StateQuery {
            target: target.into(),
            reference: reference.into(),
            time: TimeRef::Now,
            frame: None,
            aberration: None,
        }
    }

    pub fn at(mut self, time: impl Into<TimeRef>) -> Self {
        self.time = time.into();
        self
    }

    pub fn frame(mut self, frame: ReferenceFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn aberration(mut self, aberration: AberrationCorrection) -> Self {
        self.aberration = Some(aberration);
        self
    }

    pub fn target(&self) -> &BodyRef {
        &self.target
    }

    pub fn reference(&self) -> &BodyRef {
        &self.reference
    }

    pub fn time(&self) -> TimeRef {
        self.time
    }

    pub fn frame_override(&self) -> Option<ReferenceFrame> {
        self.frame
    }

    pub fn aberration_override(&self) -> Option<AberrationCorrection> {
        self.aberration
    }
}

/// Outcome of a successful state query, with the resolved inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub target: NaifId,
    pub reference: NaifId,
    pub epoch: EphemerisTime,
    pub frame: ReferenceFrame,
    pub aberration: AberrationCorrection,
    pub state: StateVector,
    /// One-way light time between target and reference (s)
    pub light_time: Second,
}

impl fmt::Display for StateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Target {} w.r.t. {} at ET {:.3} ({}, {})",
            self.target, self.reference, self.epoch, self.frame, self.aberration
        )?;
        writeln!(f, "{}", self.state)?;
        write!(f, "Light time (s): {:.6}", self.light_time)
    }
}
