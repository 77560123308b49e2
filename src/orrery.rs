//! # Orrery: ephemeris session facade
//!
//! [`Orrery`] owns one [`Toolkit`] instance together with the
//! [`KernelRegistry`] describing its kernel pool. The toolkit keeps global
//! mutable state (kernel pool, sticky error flag) and is not thread-safe, so
//! every public operation takes a single lock for its whole duration: a
//! primitive call and the error-flag check that follows it can never be split
//! by another thread.
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "sim")]
//! # {
//! use orrery::orrery::Orrery;
//! use orrery::query::StateQuery;
//! use orrery::toolkit::sim::{KernelCatalog, SimToolkit};
//!
//! let orrery = Orrery::new(SimToolkit::new(KernelCatalog::solar_system("/kernels")));
//! orrery.load_kernel("/kernels/de432s.bsp").unwrap();
//! orrery.load_kernel("/kernels/naif0012.tls").unwrap();
//!
//! let report = orrery
//!     .state(&StateQuery::new("Earth Barycenter", "Solar System Barycenter").at(0.0))
//!     .unwrap();
//! assert!(report.state.distance() > 1.0e8);
//! orrery.clear_kernels().unwrap();
//! # }
//! ```
//!
//! ## See also
//! * [`crate::query::StateQuery`] – Input of [`Orrery::state`].
//! * [`crate::config::OrreryConfig`] – Defaults and pre-check switch.
use std::collections::BTreeSet;

use camino::Utf8Path;
use hifitime::Epoch;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    config::OrreryConfig,
    constants::{EphemerisTime, NaifId},
    coverage, directory,
    kernel::KernelHandle,
    orrery_errors::OrreryError,
    query::{BodyRef, StateQuery, StateReport, TimeRef},
    registry::KernelRegistry,
    state_vector::StateVector,
    time,
    toolkit::{error_check::guarded, Toolkit},
};

struct Session<T> {
    toolkit: T,
    registry: KernelRegistry,
}

impl<T: Toolkit> Session<T> {
    fn resolve_body(&mut self, body: &BodyRef) -> Result<NaifId, OrreryError> {
        match body {
            BodyRef::Id(id) => Ok(*id),
            BodyRef::Name(name) => directory::name_to_id(&mut self.toolkit, name),
        }
    }

    fn resolve_time(&mut self, time: TimeRef) -> Result<EphemerisTime, OrreryError> {
        match time {
            TimeRef::Ephemeris(et) => Ok(et),
            TimeRef::Civil(epoch) => time::civil_to_ephemeris_time(&mut self.toolkit, &epoch),
            TimeRef::Now => {
                let now = time::now()?;
                time::civil_to_ephemeris_time(&mut self.toolkit, &now)
            }
        }
    }
}

/// Serialized handle over one toolkit instance.
pub struct Orrery<T: Toolkit> {
    config: OrreryConfig,
    session: Mutex<Session<T>>,
}

impl<T: Toolkit> Orrery<T> {
    /// Wrap `toolkit` with the default configuration.
    ///
    /// The toolkit's one-time error-reporting setup is performed here, so it
    /// returns on error instead of printing to the console.
    pub fn new(toolkit: T) -> Self {
        Self::build(toolkit, OrreryConfig::default())
    }

    /// Wrap `toolkit` with a custom configuration, validated first.
    pub fn with_config(toolkit: T, config: OrreryConfig) -> Result<Self, OrreryError> {
        config.validate()?;
        Ok(Self::build(toolkit, config))
    }

    fn build(mut toolkit: T, config: OrreryConfig) -> Self {
        toolkit.configure_error_reporting();
        Orrery {
            config,
            session: Mutex::new(Session {
                toolkit,
                registry: KernelRegistry::new(),
            }),
        }
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    /// Run `f` against the toolkit under the session lock.
    pub fn with_toolkit<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.session.lock().toolkit)
    }

    /// Give the toolkit back, dropping the registry.
    pub fn into_toolkit(self) -> T {
        self.session.into_inner().toolkit
    }

    // --- Kernel lifecycle ---

    /// See [`KernelRegistry::load`].
    pub fn load_kernel(&self, path: impl AsRef<Utf8Path>) -> Result<KernelHandle, OrreryError> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session
            .registry
            .load(&mut session.toolkit, &self.config, path)
    }

    /// See [`KernelRegistry::unload`].
    pub fn unload_kernel(&self, path: impl AsRef<Utf8Path>) -> Result<(), OrreryError> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.registry.unload(&mut session.toolkit, path)
    }

    /// See [`KernelRegistry::clear`].
    pub fn clear_kernels(&self) -> Result<(), OrreryError> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.registry.clear(&mut session.toolkit)
    }

    pub fn loaded_object_ids(&self) -> BTreeSet<NaifId> {
        self.session.lock().registry.loaded_object_ids()
    }

    pub fn loaded_kernels(&self) -> Vec<KernelHandle> {
        self.session.lock().registry.loaded_kernels().to_vec()
    }

    pub fn is_loaded(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.session.lock().registry.is_loaded(path.as_ref())
    }

    // --- Object directory ---

    pub fn object_name(&self, id: NaifId) -> Result<String, OrreryError> {
        directory::id_to_name(&mut self.session.lock().toolkit, id)
    }

    pub fn object_id(&self, name: &str) -> Result<NaifId, OrreryError> {
        directory::name_to_id(&mut self.session.lock().toolkit, name)
    }

    // --- Time conversion ---

    /// Civil instant → ephemeris time. Needs a loaded leap-second kernel.
    pub fn ephemeris_time(&self, epoch: &Epoch) -> Result<EphemerisTime, OrreryError> {
        time::civil_to_ephemeris_time(&mut self.session.lock().toolkit, epoch)
    }

    /// Ephemeris time → civil UTC instant. Needs a loaded leap-second kernel.
    pub fn civil_time(&self, et: EphemerisTime) -> Result<Epoch, OrreryError> {
        time::ephemeris_time_to_civil(&mut self.session.lock().toolkit, et)
    }

    /// Ephemeris time of the current wall-clock instant.
    pub fn ephemeris_time_now(&self) -> Result<EphemerisTime, OrreryError> {
        self.session.lock().resolve_time(TimeRef::Now)
    }

    // --- Coverage ---

    /// See [`coverage::is_covered`].
    pub fn is_covered(&self, id: NaifId, et: EphemerisTime) -> bool {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        coverage::is_covered(&session.registry, &mut session.toolkit, id, et)
    }

    // --- State query ---

    /// Position and velocity of the query's target relative to its reference.
    ///
    /// Steps
    /// -----------------
    /// 1. Names are resolved through the object directory
    ///    ([`OrreryError::InvalidObjectName`]).
    /// 2. The time is converted unless given as an ephemeris epoch
    ///    ([`OrreryError::InvalidTime`], [`OrreryError::ClockUnavailable`]).
    /// 3. With `coverage_precheck` on, target and reference must each be
    ///    supplied by some loaded trajectory kernel. Time spans are left to
    ///    the toolkit, which may still find data in an older kernel.
    /// 4. The toolkit computes the state; any failure it raises is reported.
    ///
    /// Return
    /// ----------
    /// * A [`StateReport`], or [`OrreryError::StateUnavailable`] for every
    ///   rejection of steps 3 and 4 (missing data, epoch out of range,
    ///   frame or correction refused by the toolkit). `detail` carries the
    ///   reason for diagnostics.
    pub fn state(&self, query: &StateQuery) -> Result<StateReport, OrreryError> {
        let frame = query.frame_override().unwrap_or(self.config.default_frame);
        let aberration = query
            .aberration_override()
            .unwrap_or(self.config.default_aberration);

        let mut guard = self.session.lock();
        let session = &mut *guard;

        let target = session.resolve_body(query.target())?;
        let reference = session.resolve_body(query.reference())?;
        let epoch = session.resolve_time(query.time())?;

        let unavailable = |detail: String| OrreryError::StateUnavailable {
            target,
            reference,
            epoch,
            detail,
        };

        if self.config.coverage_precheck {
            if let Some(missing) = [target, reference]
                .into_iter()
                .find(|id| !coverage::is_supplied(&session.registry, *id))
            {
                debug!(target_id = target, reference_id = reference, epoch, missing, "state refused by coverage pre-check");
                return Err(unavailable(format!(
                    "no loaded trajectory kernel supplies object {missing}"
                )));
            }
        }

        let (raw, light_time) = guarded(&mut session.toolkit, |tk| {
            tk.state(target, epoch, frame.token(), aberration.token(), reference)
        })
        .map_err(|failure| {
            debug!(target_id = target, reference_id = reference, epoch, error = %failure, "state refused by toolkit");
            unavailable(failure.to_string())
        })?;

        debug!(target_id = target, reference_id = reference, epoch, %frame, %aberration, "state computed");
        Ok(StateReport {
            target,
            reference,
            epoch,
            frame,
            aberration,
            state: StateVector::from(raw),
            light_time,
        })
    }
}
