//! # Simulated toolkit
//!
//! [`SimToolkit`] is a deterministic, in-process implementation of the
//! [`Toolkit`](super::Toolkit) contract. It reproduces the observable protocol
//! of the C toolkit it stands in for:
//!
//! 1. **Sticky error flag**: a failing primitive raises the flag, and until
//!    [`reset`](super::Toolkit::reset) every primitive returns a default
//!    value without doing anything.
//! 2. **Kernel pool**: "files" come from a [`KernelCatalog`]; later loads take
//!    precedence over earlier ones for overlapping trajectory data.
//! 3. **Leap seconds**: civil-time conversions need a loaded leap-second
//!    kernel, the conversion itself relies on `hifitime`'s leap-second table.
//! 4. **Console reports**: failures are logged with `tracing::error!` until
//!    [`configure_error_reporting`](super::Toolkit::configure_error_reporting)
//!    silences them.
//!
//! Trajectories are analytic (conic or fixed offsets), so results are exact
//! functions of the epoch and repeatable across runs.
//!
//! ## Fault injection
//!
//! [`FaultInjector`] is a cloneable handle, obtained before the toolkit is
//! handed over to an [`Orrery`](crate::orrery::Orrery), that forces the next
//! call of a given [`Primitive`] to fail.
//!
//! ```rust
//! use orrery::toolkit::sim::{KernelCatalog, Primitive, SimToolkit};
//!
//! let toolkit = SimToolkit::new(KernelCatalog::solar_system("/kernels"));
//! let faults = toolkit.fault_injector();
//! faults.fail_next(Primitive::Clear, "SPICE(DAFFRNOTFOUND)");
//! ```
mod bodies;
mod calendar;
pub mod catalog;
pub mod conic;
mod orientation;

use std::{collections::HashMap, sync::Arc};

use hifitime::Epoch;
use nalgebra::Vector3;
use parking_lot::Mutex;

use crate::constants::{EphemerisTime, NaifId, Second, SOLAR_SYSTEM_BARYCENTER, VLIGHT};

use super::{MessageKind, RawState, Toolkit, ToolkitFailure};

pub use catalog::{KernelCatalog, Motion, Segment, VirtualKernel};
pub use conic::ConicOrbit;

use orientation::SimFrame;

/// Longest center chain followed before giving up (guards against cycles).
const MAX_CHAIN_DEPTH: usize = 32;

/// |ET| beyond which calendar conversions are refused.
const MAX_CALENDAR_ET: f64 = 1.0e13;

/// Toolkit primitives that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Load,
    Unload,
    Clear,
    State,
    NameToId,
    IdToName,
    CivilToEt,
    EtToCivil,
    ObjectIds,
    EpochCovered,
}

/// Shared handle arming one-shot failures on a [`SimToolkit`].
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    pending: Arc<Mutex<HashMap<Primitive, String>>>,
}

impl FaultInjector {
    /// Make the next call of `primitive` raise the error flag with `short`.
    pub fn fail_next(&self, primitive: Primitive, short: impl Into<String>) {
        self.pending.lock().insert(primitive, short.into());
    }

    /// Number of armed faults not yet triggered.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    fn take(&self, primitive: Primitive) -> Option<String> {
        self.pending.lock().remove(&primitive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Correction {
    None,
    LightTime,
    LightTimeStellar,
}

impl Correction {
    fn from_token(token: &str) -> Option<Self> {
        let compact: String = token
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match compact.as_str() {
            "NONE" => Some(Correction::None),
            "LT" => Some(Correction::LightTime),
            "LT+S" => Some(Correction::LightTimeStellar),
            _ => None,
        }
    }
}

type Kinematics = (Vector3<f64>, Vector3<f64>);

/// In-process ephemeris engine over a [`KernelCatalog`].
#[derive(Debug)]
pub struct SimToolkit {
    catalog: KernelCatalog,
    loaded: Vec<String>,
    error: Option<ToolkitFailure>,
    console_reports: bool,
    faults: FaultInjector,
}

impl SimToolkit {
    pub fn new(catalog: KernelCatalog) -> Self {
        SimToolkit {
            catalog,
            loaded: Vec::new(),
            error: None,
            console_reports: true,
            faults: FaultInjector::default(),
        }
    }

    /// Handle for arming failures, usable after the toolkit has been moved.
    pub fn fault_injector(&self) -> FaultInjector {
        self.faults.clone()
    }

    /// Paths in the kernel pool, in load order.
    pub fn loaded_paths(&self) -> &[String] {
        &self.loaded
    }

    /// Whether failures are still echoed to the log.
    pub fn reports_to_console(&self) -> bool {
        self.console_reports
    }

    fn signal(&mut self, short: impl Into<String>, long: impl Into<String>) {
        let failure = ToolkitFailure {
            short: short.into(),
            long: long.into(),
        };
        if self.console_reports {
            tracing::error!(short = %failure.short, long = %failure.long, "toolkit error");
        }
        // the first failure wins until reset
        if self.error.is_none() {
            self.error = Some(failure);
        }
    }

    /// Common prologue: honor the sticky flag and armed faults.
    /// Returns `false` when the primitive must not run.
    fn enter(&mut self, primitive: Primitive) -> bool {
        if self.error.is_some() {
            return false;
        }
        if let Some(short) = self.faults.take(primitive) {
            self.signal(short, format!("Injected failure in {primitive:?}."));
            return false;
        }
        true
    }

    fn loaded_kernels(&self) -> impl DoubleEndedIterator<Item = &VirtualKernel> {
        self.loaded.iter().filter_map(|path| self.catalog.get(path))
    }

    fn has_leap_seconds(&self) -> bool {
        self.loaded_kernels()
            .any(|k| matches!(k, VirtualKernel::LeapSeconds))
    }

    fn has_orientation(&self) -> bool {
        self.loaded_kernels()
            .any(|k| matches!(k, VirtualKernel::Orientation))
    }

    fn require_leap_seconds(&mut self) -> bool {
        if self.has_leap_seconds() {
            return true;
        }
        self.signal(
            "SPICE(NOLEAPSECONDS)",
            "The variable that points to the leapseconds (DELTET/DELTA_AT) could not be located in the kernel pool. It is likely that the leapseconds kernel has not been loaded.",
        );
        false
    }

    /// Segment supplying `id` at `et`, most recently loaded first.
    fn find_segment(&self, id: NaifId, et: EphemerisTime) -> Option<&Segment> {
        self.loaded_kernels()
            .rev()
            .flat_map(|kernel| kernel.segments().iter().rev())
            .find(|segment| segment.target == id && segment.covers(et))
    }

    /// State of `id` relative to the solar-system barycenter. `Err` names the
    /// body whose data is missing.
    fn barycentric(&self, id: NaifId, et: EphemerisTime) -> Result<Kinematics, NaifId> {
        let mut pos = Vector3::zeros();
        let mut vel = Vector3::zeros();
        let mut current = id;
        for _ in 0..MAX_CHAIN_DEPTH {
            if current == SOLAR_SYSTEM_BARYCENTER {
                return Ok((pos, vel));
            }
            let segment = self.find_segment(current, et).ok_or(current)?;
            let (p, v) = segment.motion.state_at(et);
            pos += p;
            vel += v;
            current = segment.center;
        }
        Err(current)
    }

    fn insufficient_data(&mut self, body: NaifId, observer: NaifId, et: EphemerisTime) {
        self.signal(
            "SPICE(SPKINSUFFDATA)",
            format!(
                "Insufficient ephemeris data has been loaded to compute the state of {body} relative to {observer} at the ephemeris epoch {et}."
            ),
        );
    }

    fn relative_state(
        &self,
        target: NaifId,
        observer: NaifId,
        et: EphemerisTime,
        correction: Correction,
    ) -> Result<(Kinematics, Second), NaifId> {
        let (obs_pos, obs_vel) = self.barycentric(observer, et)?;
        let (mut tgt_pos, mut tgt_vel) = self.barycentric(target, et)?;
        let mut lt = (tgt_pos - obs_pos).norm() / VLIGHT;

        if correction != Correction::None {
            for _ in 0..3 {
                (tgt_pos, tgt_vel) = self.barycentric(target, et - lt)?;
                lt = (tgt_pos - obs_pos).norm() / VLIGHT;
            }
        }

        let mut pos = tgt_pos - obs_pos;
        let vel = tgt_vel - obs_vel;
        if correction == Correction::LightTimeStellar {
            // first-order stellar aberration: shift toward the observer's motion
            pos += pos.norm() / VLIGHT * obs_vel;
        }
        Ok(((pos, vel), lt))
    }
}

impl Toolkit for SimToolkit {
    fn configure_error_reporting(&mut self) {
        self.console_reports = false;
    }

    fn load(&mut self, path: &str) {
        if !self.enter(Primitive::Load) {
            return;
        }
        if !self.catalog.contains(path) {
            self.signal(
                "SPICE(NOSUCHFILE)",
                format!("The first file '{path}' specified by FILE does not exist."),
            );
            return;
        }
        // reloading moves the file to the highest precedence
        self.loaded.retain(|p| p != path);
        self.loaded.push(path.to_string());
    }

    fn unload(&mut self, path: &str) {
        if !self.enter(Primitive::Unload) {
            return;
        }
        self.loaded.retain(|p| p != path);
    }

    fn clear(&mut self) {
        if !self.enter(Primitive::Clear) {
            return;
        }
        self.loaded.clear();
    }

    fn state(
        &mut self,
        target: NaifId,
        et: EphemerisTime,
        frame: &str,
        abcorr: &str,
        observer: NaifId,
    ) -> (RawState, Second) {
        let nothing = ([0.0; 6], 0.0);
        if !self.enter(Primitive::State) {
            return nothing;
        }
        let Some(sim_frame) = SimFrame::from_token(frame) else {
            self.signal(
                "SPICE(UNKNOWNFRAME)",
                format!("The requested output frame '{frame}' is not recognized."),
            );
            return nothing;
        };
        let Some(correction) = Correction::from_token(abcorr) else {
            self.signal(
                "SPICE(INVALIDOPTION)",
                format!("'{abcorr}' is not a recognized value for the aberration correction."),
            );
            return nothing;
        };
        if sim_frame.is_body_fixed() && !self.has_orientation() {
            self.signal(
                "SPICE(FRAMEDATANOTFOUND)",
                format!("Insufficient orientation data to evaluate frame '{frame}'."),
            );
            return nothing;
        }
        if !et.is_finite() {
            self.insufficient_data(target, observer, et);
            return nothing;
        }
        if target == observer {
            return nothing;
        }

        match self.relative_state(target, observer, et, correction) {
            Ok(((pos, vel), lt)) => {
                let (p, v) = sim_frame.express(et, pos, vel);
                ([p.x, p.y, p.z, v.x, v.y, v.z], lt)
            }
            Err(missing) => {
                self.insufficient_data(missing, observer, et);
                nothing
            }
        }
    }

    fn name_to_id(&mut self, name: &str) -> Option<NaifId> {
        if !self.enter(Primitive::NameToId) {
            return None;
        }
        let wanted = bodies::normalize_name(name);
        self.loaded_kernels()
            .rev()
            .filter_map(|kernel| match kernel {
                VirtualKernel::BodyNames(bindings) => Some(bindings),
                _ => None,
            })
            .flat_map(|bindings| bindings.iter().rev())
            .find(|(n, _)| bodies::normalize_name(n) == wanted)
            .map(|(_, id)| *id)
            .or_else(|| bodies::builtin_id(name))
    }

    fn id_to_name(&mut self, id: NaifId) -> Option<String> {
        if !self.enter(Primitive::IdToName) {
            return None;
        }
        self.loaded_kernels()
            .rev()
            .filter_map(|kernel| match kernel {
                VirtualKernel::BodyNames(bindings) => Some(bindings),
                _ => None,
            })
            .flat_map(|bindings| bindings.iter().rev())
            .find(|(_, code)| *code == id)
            .map(|(n, _)| bodies::normalize_name(n))
            .or_else(|| bodies::builtin_name(id).map(str::to_string))
    }

    fn civil_to_et(&mut self, time: &str) -> EphemerisTime {
        if !self.enter(Primitive::CivilToEt) || !self.require_leap_seconds() {
            return 0.0;
        }
        match calendar::parse_civil(time) {
            Some(epoch) => epoch.to_et_seconds(),
            None => {
                self.signal(
                    "SPICE(UNPARSEDTIME)",
                    format!("The input string '{time}' could not be parsed as a time."),
                );
                0.0
            }
        }
    }

    fn et_to_civil(&mut self, et: EphemerisTime, precision: u32) -> String {
        if !self.enter(Primitive::EtToCivil) || !self.require_leap_seconds() {
            return String::new();
        }
        if !et.is_finite() || et.abs() > MAX_CALENDAR_ET {
            self.signal(
                "SPICE(TIMEOUTOFBOUNDS)",
                format!("The epoch {et} is outside the supported calendar range."),
            );
            return String::new();
        }
        calendar::format_iso(Epoch::from_et_seconds(et), precision)
    }

    fn object_ids(&mut self, path: &str, capacity: usize) -> Vec<NaifId> {
        if !self.enter(Primitive::ObjectIds) {
            return Vec::new();
        }
        let ids = match self.catalog.get(path) {
            None => {
                self.signal(
                    "SPICE(FILENOTFOUND)",
                    format!("The file '{path}' was not found."),
                );
                return Vec::new();
            }
            Some(VirtualKernel::Trajectory(segments)) => {
                let mut ids: Vec<NaifId> = segments.iter().map(|s| s.target).collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            }
            Some(_) => {
                self.signal(
                    "SPICE(INVALIDARCHTYPE)",
                    format!("The file '{path}' is not a trajectory kernel."),
                );
                return Vec::new();
            }
        };
        if ids.len() > capacity {
            self.signal(
                "SPICE(CELLTOOSMALL)",
                format!(
                    "The file '{path}' contains {} objects, the output cell holds {capacity}.",
                    ids.len()
                ),
            );
            return Vec::new();
        }
        ids
    }

    fn epoch_covered(&mut self, path: &str, id: NaifId, et: EphemerisTime) -> bool {
        if !self.enter(Primitive::EpochCovered) {
            return false;
        }
        match self.catalog.get(path) {
            Some(kernel) => kernel
                .segments()
                .iter()
                .any(|s| s.target == id && s.covers(et)),
            None => {
                self.signal(
                    "SPICE(FILENOTFOUND)",
                    format!("The file '{path}' was not found."),
                );
                false
            }
        }
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn message(&self, kind: MessageKind) -> String {
        match (&self.error, kind) {
            (Some(failure), MessageKind::Short) => failure.short.clone(),
            (Some(failure), MessageKind::Long) => failure.long.clone(),
            (None, _) => String::new(),
        }
    }

    fn reset(&mut self) {
        self.error = None;
    }
}
