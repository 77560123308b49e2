//! # Kernel handles
//!
//! A [`KernelHandle`] identifies a loaded kernel by its UTF-8 path and records
//! the [`KernelKind`] inferred from the file extension. The path is the unique
//! key: two handles with the same path denote the same kernel.
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{config::OrreryConfig, orrery_errors::OrreryError};

/// Coarse kernel category, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Trajectory kernel: supplies object coverage
    Trajectory,
    /// Leap-second kernel: enables civil-time conversions
    LeapSeconds,
    /// Anything else (orientation constants, name bindings, ...)
    Other,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KernelKind::Trajectory => "trajectory",
            KernelKind::LeapSeconds => "leap seconds",
            KernelKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// A kernel known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelHandle {
    path: Utf8PathBuf,
    kind: KernelKind,
}

impl KernelHandle {
    /// Validate `path` and classify it with the extensions of `config`.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: Kernel file path, passed to the toolkit verbatim.
    /// * `config`: Provides the trajectory / leap-second extension lists.
    ///
    /// Return
    /// ----------
    /// * The handle, or [`OrreryError::InvalidKernelPath`] when the path is empty
    ///   or holds a NUL byte (it could not cross the toolkit's C-string boundary).
    pub fn new(path: impl AsRef<Utf8Path>, config: &OrreryConfig) -> Result<Self, OrreryError> {
        let path = path.as_ref();
        if path.as_str().trim().is_empty() || path.as_str().contains('\0') {
            return Err(OrreryError::InvalidKernelPath(path.to_string()));
        }
        let kind = classify(path, config);
        Ok(KernelHandle {
            path: path.to_path_buf(),
            kind,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    pub fn is_trajectory(&self) -> bool {
        self.kind == KernelKind::Trajectory
    }
}

impl fmt::Display for KernelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.kind)
    }
}

fn classify(path: &Utf8Path, config: &OrreryConfig) -> KernelKind {
    let Some(ext) = path.extension() else {
        return KernelKind::Other;
    };
    let matches = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(ext));
    if matches(&config.trajectory_extensions[..]) {
        KernelKind::Trajectory
    } else if matches(&config.leap_second_extensions[..]) {
        KernelKind::LeapSeconds
    } else {
        KernelKind::Other
    }
}
