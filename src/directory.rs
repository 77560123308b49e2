//! # Object directory
//!
//! Name ↔ ID resolution of celestial bodies, delegated to the toolkit.
//! Results depend on the kernels loaded at call time (text kernels can add
//! bindings), nothing is cached here.
use tracing::debug;

use crate::{
    constants::NaifId,
    orrery_errors::OrreryError,
    toolkit::{error_check::guarded, Toolkit},
};

/// Canonical (upper-case) name of `id`.
///
/// Return
/// ----------
/// * [`OrreryError::InvalidObjectId`] when the toolkit knows no such body or
///   raises its error flag.
pub fn id_to_name<T: Toolkit + ?Sized>(toolkit: &mut T, id: NaifId) -> Result<String, OrreryError> {
    match guarded(toolkit, |tk| tk.id_to_name(id)) {
        Ok(Some(name)) => Ok(name),
        Ok(None) => Err(OrreryError::InvalidObjectId(id)),
        Err(failure) => {
            debug!(id, error = %failure, "id lookup failed");
            Err(OrreryError::InvalidObjectId(id))
        }
    }
}

/// ID bound to `name` (case and blank insensitive).
///
/// Return
/// ----------
/// * [`OrreryError::InvalidObjectName`] when the name is unknown or the
///   toolkit raises its error flag.
pub fn name_to_id<T: Toolkit + ?Sized>(toolkit: &mut T, name: &str) -> Result<NaifId, OrreryError> {
    match guarded(toolkit, |tk| tk.name_to_id(name)) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(OrreryError::InvalidObjectName(name.to_string())),
        Err(failure) => {
            debug!(name, error = %failure, "name lookup failed");
            Err(OrreryError::InvalidObjectName(name.to_string()))
        }
    }
}
