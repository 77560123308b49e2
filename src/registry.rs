//! # Kernel registry
//!
//! Bookkeeping of the kernels loaded into a toolkit instance:
//!
//! * the loaded [`KernelHandle`]s, unique by path, in load order;
//! * for trajectory kernels, which file supplies each object ID
//!   (the *coverage owner*).
//!
//! The registry only changes after the toolkit confirmed the operation.
//! Every toolkit primitive goes through [`guarded`], so a failure is captured
//! and the error flag lowered before the registry decides what to do.
//!
//! ## Coverage ownership
//!
//! When two loaded trajectory kernels supply the same object, the most recent
//! load becomes the owner (the overwrite is logged at debug level). Unloading
//! a kernel drops every ID it owns, even if an older kernel also supplies it.
//!
//! ## See also
//! * [`crate::coverage::is_covered`] – Uses the coverage owners.
//! * [`crate::orrery::Orrery`] – Serializes access to a registry and its toolkit.
use std::collections::{BTreeSet, HashMap};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::{
    config::OrreryConfig,
    constants::NaifId,
    kernel::KernelHandle,
    orrery_errors::OrreryError,
    toolkit::{error_check::guarded, Toolkit},
};

#[derive(Debug, Clone, Default)]
pub struct KernelRegistry {
    kernels: Vec<KernelHandle>,
    coverage: HashMap<NaifId, Utf8PathBuf>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, path: &Utf8Path) -> bool {
        self.kernels.iter().any(|k| k.path() == path)
    }

    /// Load a kernel into `toolkit` and record it.
    ///
    /// Arguments
    /// -----------------
    /// * `toolkit`: The engine receiving the file.
    /// * `config`: Extension lists (kind inference) and enumeration capacity.
    /// * `path`: Kernel file path.
    ///
    /// Return
    /// ----------
    /// * The new [`KernelHandle`], or:
    ///   - [`OrreryError::InvalidKernelPath`] for an empty / NUL-carrying path,
    ///   - [`OrreryError::KernelAlreadyLoaded`] if the path is already registered,
    ///   - [`OrreryError::KernelLoadFailed`] if the toolkit rejects the file or
    ///     cannot enumerate its objects. In the latter case the toolkit load is
    ///     rolled back so registry and toolkit stay in step.
    pub fn load<T: Toolkit + ?Sized>(
        &mut self,
        toolkit: &mut T,
        config: &OrreryConfig,
        path: impl AsRef<Utf8Path>,
    ) -> Result<KernelHandle, OrreryError> {
        let handle = KernelHandle::new(path, config)?;
        let path = handle.path();
        if self.is_loaded(path) {
            return Err(OrreryError::KernelAlreadyLoaded(path.to_string()));
        }

        guarded(toolkit, |tk| tk.load(path.as_str())).map_err(|failure| {
            warn!(path = %path, error = %failure, "kernel load rejected by toolkit");
            OrreryError::KernelLoadFailed {
                path: path.to_string(),
                reason: failure.to_string(),
            }
        })?;

        let ids = if handle.is_trajectory() {
            match guarded(toolkit, |tk| tk.object_ids(path.as_str(), config.max_object_ids)) {
                Ok(ids) => ids,
                Err(failure) => {
                    warn!(path = %path, error = %failure, "object enumeration failed, rolling back load");
                    if let Err(rollback) = guarded(toolkit, |tk| tk.unload(path.as_str())) {
                        warn!(path = %path, error = %rollback, "rollback unload failed");
                    }
                    return Err(OrreryError::KernelLoadFailed {
                        path: path.to_string(),
                        reason: failure.to_string(),
                    });
                }
            }
        } else {
            Vec::new()
        };

        for id in &ids {
            if let Some(previous) = self.coverage.insert(*id, path.to_path_buf()) {
                debug!(id, previous = %previous, owner = %path, "coverage owner overwritten");
            }
        }
        info!(path = %path, kind = %handle.kind(), objects = ids.len(), "kernel loaded");
        self.kernels.push(handle.clone());
        Ok(handle)
    }

    /// Unload a registered kernel and drop the object IDs it owns.
    ///
    /// Return
    /// ----------
    /// * [`OrreryError::KernelNotLoaded`] if the path is not registered,
    ///   [`OrreryError::KernelUnloadFailed`] if the toolkit rejects the unload
    ///   (registry left unchanged).
    pub fn unload<T: Toolkit + ?Sized>(
        &mut self,
        toolkit: &mut T,
        path: impl AsRef<Utf8Path>,
    ) -> Result<(), OrreryError> {
        let path = path.as_ref();
        let Some(idx) = self.kernels.iter().position(|k| k.path() == path) else {
            return Err(OrreryError::KernelNotLoaded(path.to_string()));
        };

        guarded(toolkit, |tk| tk.unload(path.as_str())).map_err(|failure| {
            warn!(path = %path, error = %failure, "kernel unload rejected by toolkit");
            OrreryError::KernelUnloadFailed {
                path: path.to_string(),
                reason: failure.to_string(),
            }
        })?;

        self.kernels.remove(idx);
        self.coverage.retain(|_, owner| owner.as_path() != path);
        info!(path = %path, "kernel unloaded");
        Ok(())
    }

    /// Unload every kernel.
    ///
    /// On failure the bookkeeping is kept as is: the toolkit may have dropped
    /// part of its pool, so the registry can over-report loaded kernels until a
    /// later `clear` succeeds.
    pub fn clear<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T) -> Result<(), OrreryError> {
        guarded(toolkit, |tk| tk.clear()).map_err(|failure| {
            warn!(
                error = %failure,
                kernels = self.kernels.len(),
                "kernel clear failed, registry may no longer match the toolkit pool"
            );
            OrreryError::KernelClearFailed {
                reason: failure.to_string(),
            }
        })?;

        self.kernels.clear();
        self.coverage.clear();
        info!("kernels cleared");
        Ok(())
    }

    /// Snapshot of the object IDs supplied by loaded trajectory kernels.
    pub fn loaded_object_ids(&self) -> BTreeSet<NaifId> {
        self.coverage.keys().copied().collect()
    }

    /// Loaded kernels in load order.
    pub fn loaded_kernels(&self) -> &[KernelHandle] {
        &self.kernels
    }

    /// Trajectory kernel currently owning `id`.
    pub fn owner(&self, id: NaifId) -> Option<&Utf8Path> {
        self.coverage.get(&id).map(Utf8PathBuf::as_path)
    }
}

#[cfg(all(test, feature = "sim"))]
mod test_registry {
    use super::*;
    use crate::constants::{ET_1950, ET_2050};
    use crate::toolkit::sim::{KernelCatalog, Motion, Primitive, Segment, SimToolkit, VirtualKernel};
    use nalgebra::Vector3;

    const SPK: &str = "/kernels/de432s.bsp";
    const LSK: &str = "/kernels/naif0012.tls";
    const EXTRA: &str = "/kernels/emb_patch.bsp";

    fn toolkit() -> SimToolkit {
        let catalog = KernelCatalog::solar_system("/kernels").with_file(
            EXTRA,
            VirtualKernel::Trajectory(vec![Segment::new(
                3,
                0,
                ET_1950,
                ET_2050,
                Motion::Fixed(Vector3::new(1.5e8, 0.0, 0.0)),
            )]),
        );
        let mut tk = SimToolkit::new(catalog);
        tk.configure_error_reporting();
        tk
    }

    #[test]
    fn test_load_records_objects() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let config = OrreryConfig::default();

        let handle = reg.load(&mut tk, &config, SPK).unwrap();
        assert!(handle.is_trajectory());
        let ids = reg.loaded_object_ids();
        assert_eq!(ids.len(), 15);
        assert!(ids.contains(&3) && ids.contains(&399));
        assert_eq!(reg.owner(3), Some(Utf8Path::new(SPK)));

        // leap seconds add no coverage
        reg.load(&mut tk, &config, LSK).unwrap();
        assert_eq!(reg.loaded_object_ids().len(), 15);
        assert_eq!(reg.loaded_kernels().len(), 2);
    }

    #[test]
    fn test_double_load() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let config = OrreryConfig::default();

        reg.load(&mut tk, &config, SPK).unwrap();
        assert_eq!(
            reg.load(&mut tk, &config, SPK),
            Err(OrreryError::KernelAlreadyLoaded(SPK.into()))
        );
        assert_eq!(reg.loaded_object_ids().len(), 15);
    }

    #[test]
    fn test_failed_load_leaves_registry_untouched() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let err = reg
            .load(&mut tk, &OrreryConfig::default(), "/kernels/missing.bsp")
            .unwrap_err();
        assert!(matches!(err, OrreryError::KernelLoadFailed { .. }));
        assert!(reg.loaded_kernels().is_empty());
        assert!(!tk.failed());
    }

    #[test]
    fn test_enumeration_failure_rolls_back() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let config = OrreryConfig::builder().max_object_ids(4).build().unwrap();

        let err = reg.load(&mut tk, &config, SPK).unwrap_err();
        match err {
            OrreryError::KernelLoadFailed { reason, .. } => {
                assert!(reason.contains("CELLTOOSMALL"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(reg.loaded_kernels().is_empty());
        assert!(tk.loaded_paths().is_empty());
    }

    #[test]
    fn test_unload_round_trip() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let config = OrreryConfig::default();

        reg.load(&mut tk, &config, LSK).unwrap();
        let before = reg.loaded_object_ids();
        reg.load(&mut tk, &config, SPK).unwrap();
        reg.unload(&mut tk, SPK).unwrap();
        assert_eq!(reg.loaded_object_ids(), before);
        assert!(!reg.is_loaded(Utf8Path::new(SPK)));

        assert_eq!(
            reg.unload(&mut tk, SPK),
            Err(OrreryError::KernelNotLoaded(SPK.into()))
        );
    }

    #[test]
    fn test_last_load_wins() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();
        let config = OrreryConfig::default();

        reg.load(&mut tk, &config, SPK).unwrap();
        reg.load(&mut tk, &config, EXTRA).unwrap();
        assert_eq!(reg.owner(3), Some(Utf8Path::new(EXTRA)));

        // the patch owned 3: unloading it drops the ID
        reg.unload(&mut tk, EXTRA).unwrap();
        assert!(!reg.loaded_object_ids().contains(&3));
        assert!(reg.loaded_object_ids().contains(&399));
    }

    #[test]
    fn test_clear() {
        let mut tk = toolkit();
        let mut reg = KernelRegistry::new();

        // clearing nothing is fine
        reg.clear(&mut tk).unwrap();
        assert!(reg.loaded_object_ids().is_empty());

        reg.load(&mut tk, &OrreryConfig::default(), SPK).unwrap();
        reg.clear(&mut tk).unwrap();
        assert!(reg.loaded_object_ids().is_empty());
        assert!(reg.loaded_kernels().is_empty());
        assert!(tk.loaded_paths().is_empty());
    }

    #[test]
    fn test_clear_failure_keeps_bookkeeping() {
        let mut tk = toolkit();
        let faults = tk.fault_injector();
        let mut reg = KernelRegistry::new();
        reg.load(&mut tk, &OrreryConfig::default(), SPK).unwrap();

        faults.fail_next(Primitive::Clear, "SPICE(INJECTED)");
        let err = reg.clear(&mut tk).unwrap_err();
        assert!(matches!(err, OrreryError::KernelClearFailed { .. }));
        assert_eq!(reg.loaded_kernels().len(), 1);
        assert_eq!(reg.loaded_object_ids().len(), 15);
    }

    #[test]
    fn test_unload_failure_keeps_bookkeeping() {
        let mut tk = toolkit();
        let faults = tk.fault_injector();
        let mut reg = KernelRegistry::new();
        reg.load(&mut tk, &OrreryConfig::default(), SPK).unwrap();

        faults.fail_next(Primitive::Unload, "SPICE(INJECTED)");
        assert!(matches!(
            reg.unload(&mut tk, SPK),
            Err(OrreryError::KernelUnloadFailed { .. })
        ));
        assert!(reg.is_loaded(Utf8Path::new(SPK)));
        assert_eq!(reg.owner(399), Some(Utf8Path::new(SPK)));
    }
}
