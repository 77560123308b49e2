//! Coverage validation: does loaded trajectory data cover an (object, epoch) pair?
use tracing::{debug, warn};

use crate::{
    constants::{EphemerisTime, NaifId, SOLAR_SYSTEM_BARYCENTER},
    registry::KernelRegistry,
    toolkit::{error_check::guarded, Toolkit},
};

/// Whether any loaded trajectory kernel supplies `id` at all.
///
/// This is the cheap half of [`is_covered`]: it reads the registry only and
/// never calls the toolkit. The solar-system barycenter is always supplied.
pub fn is_supplied(registry: &KernelRegistry, id: NaifId) -> bool {
    id == SOLAR_SYSTEM_BARYCENTER || registry.owner(id).is_some()
}

/// Whether the kernel owning `id` covers `et`.
///
/// The solar-system barycenter is the root of every trajectory chain and is
/// always covered. Any other ID must have a coverage owner in `registry`, whose
/// time span for that object is then checked by the toolkit.
///
/// A toolkit failure during the check counts as "not covered"; it is logged
/// and the error flag is lowered.
pub fn is_covered<T: Toolkit + ?Sized>(
    registry: &KernelRegistry,
    toolkit: &mut T,
    id: NaifId,
    et: EphemerisTime,
) -> bool {
    if id == SOLAR_SYSTEM_BARYCENTER {
        return true;
    }
    let Some(owner) = registry.owner(id) else {
        debug!(id, et, "no loaded kernel supplies object");
        return false;
    };
    match guarded(toolkit, |tk| tk.epoch_covered(owner.as_str(), id, et)) {
        Ok(covered) => {
            debug!(id, et, owner = %owner, covered, "coverage checked");
            covered
        }
        Err(failure) => {
            warn!(id, et, owner = %owner, error = %failure, "coverage check failed");
            false
        }
    }
}
