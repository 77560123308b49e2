//! # Ephemeris toolkit contract
//!
//! The numerical work (trajectory interpolation, kernel decoding, leap-second
//! tables) belongs to an external toolkit. This module pins down the narrow
//! surface Orrery consumes from it as the [`Toolkit`] trait.
//!
//! ## Error protocol
//!
//! Primitives do not return `Result`. Like the C toolkit they model, a failing
//! primitive raises a **sticky, global error flag** and returns a default value.
//! The flag stays raised, and further primitives are no-ops, until
//! [`Toolkit::reset`] is called. Callers never read the flag directly: every
//! primitive invocation goes through [`error_check::guarded`], which reads,
//! reports and resets the flag in the same step.
//!
//! ## Implementations
//!
//! * `sim::SimToolkit` (feature `sim`, on by default) – deterministic
//!   in-process engine backed by a virtual kernel catalog, analytic conic
//!   trajectories and `hifitime` leap seconds. Applications bringing their
//!   own engine can build with `default-features = false`.
//!
//! ## See also
//! * [`crate::orrery::Orrery`] – Serialized facade owning one toolkit instance.
pub mod error_check;
#[cfg(feature = "sim")]
pub mod sim;

use std::fmt;

use crate::constants::{EphemerisTime, NaifId, Second};

/// Which of the two toolkit messages to retrieve after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Short error code, e.g. `SPICE(NOSUCHFILE)`
    Short,
    /// Human-readable explanation
    Long,
}

/// Six-component state (km, km/s) as returned by the toolkit.
pub type RawState = [f64; 6];

/// The external numerical engine.
///
/// Implementations are **not** expected to be thread-safe; Orrery serializes
/// every call behind a single lock.
pub trait Toolkit: Send {
    /// One-time setup: return on error instead of aborting, and stop printing
    /// errors to the console.
    fn configure_error_reporting(&mut self);

    /// Load a kernel file into the kernel pool.
    fn load(&mut self, path: &str);

    /// Unload a previously loaded kernel file.
    fn unload(&mut self, path: &str);

    /// Unload every kernel and reset the kernel pool.
    fn clear(&mut self);

    /// State of `target` relative to `observer` at `et`, in `frame`, with the
    /// aberration correction `abcorr`. Returns the state and the one-way light time.
    fn state(
        &mut self,
        target: NaifId,
        et: EphemerisTime,
        frame: &str,
        abcorr: &str,
        observer: NaifId,
    ) -> (RawState, Second);

    /// Resolve a body name, `None` when no binding exists.
    fn name_to_id(&mut self, name: &str) -> Option<NaifId>;

    /// Resolve a body ID to its canonical name, `None` when no binding exists.
    fn id_to_name(&mut self, id: NaifId) -> Option<String>;

    /// Convert a civil time string to ephemeris time. Needs leap seconds.
    fn civil_to_et(&mut self, time: &str) -> EphemerisTime;

    /// Convert ephemeris time to an ISO calendar UTC string with `precision`
    /// fractional second digits. Needs leap seconds.
    fn et_to_civil(&mut self, et: EphemerisTime, precision: u32) -> String;

    /// IDs of the objects for which the trajectory file at `path` holds data,
    /// bounded by `capacity`.
    fn object_ids(&mut self, path: &str, capacity: usize) -> Vec<NaifId>;

    /// Whether the trajectory file at `path` covers `id` at `et`.
    fn epoch_covered(&mut self, path: &str, id: NaifId, et: EphemerisTime) -> bool;

    /// Whether the error flag is raised.
    fn failed(&self) -> bool;

    /// Message attached to the current failure (empty when none).
    fn message(&self, kind: MessageKind) -> String;

    /// Lower the error flag.
    fn reset(&mut self);
}

/// A failure read back from the toolkit error flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitFailure {
    pub short: String,
    pub long: String,
}

impl fmt::Display for ToolkitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long.is_empty() {
            write!(f, "{}", self.short)
        } else {
            write!(f, "{}: {}", self.short, self.long)
        }
    }
}
