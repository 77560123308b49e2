use thiserror::Error;

use crate::constants::{EphemerisTime, NaifId};

#[derive(Error, Debug, Clone)]
pub enum OrreryError {
    #[error("Kernel already loaded: {0}")]
    KernelAlreadyLoaded(String),

    #[error("Kernel not loaded: {0}")]
    KernelNotLoaded(String),

    #[error("Failed to load kernel: {path} ({reason})")]
    KernelLoadFailed { path: String, reason: String },

    #[error("Failed to unload kernel: {path} ({reason})")]
    KernelUnloadFailed { path: String, reason: String },

    #[error("Failed to clear kernels ({reason})")]
    KernelClearFailed { reason: String },

    #[error("Invalid kernel path: {0:?}")]
    InvalidKernelPath(String),

    #[error("Invalid Object ID: {0}")]
    InvalidObjectId(NaifId),

    #[error("Invalid Object Name: {0}")]
    InvalidObjectName(String),

    #[error("Invalid Time: {time} ({reason}) (Note: make sure a leapseconds kernel has been loaded)")]
    InvalidTime { time: String, reason: String },

    #[error(
        "Failed to get state for object ID {target} with respect to object ID {reference} at epoch {epoch} ({detail}) (Note: make sure the appropriate kernels have been loaded)"
    )]
    StateUnavailable {
        target: NaifId,
        reference: NaifId,
        epoch: EphemerisTime,
        detail: String,
    },

    #[error("System clock unavailable: {0}")]
    ClockUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (KernelAlreadyLoaded(a), KernelAlreadyLoaded(b)) => a == b,
            (KernelNotLoaded(a), KernelNotLoaded(b)) => a == b,
            (InvalidKernelPath(a), InvalidKernelPath(b)) => a == b,
            (InvalidObjectId(a), InvalidObjectId(b)) => a == b,
            (InvalidObjectName(a), InvalidObjectName(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (ClockUnavailable(a), ClockUnavailable(b)) => a == b,

            // Engine messages are diagnostics only: same variant and same subject is enough
            (KernelLoadFailed { path: a, .. }, KernelLoadFailed { path: b, .. }) => a == b,
            (KernelUnloadFailed { path: a, .. }, KernelUnloadFailed { path: b, .. }) => a == b,
            (KernelClearFailed { .. }, KernelClearFailed { .. }) => true,
            (InvalidTime { time: a, .. }, InvalidTime { time: b, .. }) => a == b,
            (
                StateUnavailable {
                    target: t1,
                    reference: r1,
                    epoch: e1,
                    ..
                },
                StateUnavailable {
                    target: t2,
                    reference: r2,
                    epoch: e2,
                    ..
                },
            ) => t1 == t2 && r1 == r2 && e1 == e2,

            _ => false,
        }
    }
}

#[cfg(test)]
mod test_orrery_errors {
    use super::*;

    #[test]
    fn test_equality_ignores_engine_messages() {
        let a = OrreryError::KernelLoadFailed {
            path: "de432s.bsp".into(),
            reason: "SPICE(NOSUCHFILE)".into(),
        };
        let b = OrreryError::KernelLoadFailed {
            path: "de432s.bsp".into(),
            reason: "something else".into(),
        };
        assert_eq!(a, b);
        assert_ne!(a, OrreryError::KernelAlreadyLoaded("de432s.bsp".into()));
    }

    #[test]
    fn test_display_hints() {
        let err = OrreryError::InvalidTime {
            time: "2024-JAN-01 00:00:00.000".into(),
            reason: "SPICE(NOLEAPSECONDS)".into(),
        };
        assert!(err.to_string().contains("leapseconds kernel"));

        let err = OrreryError::StateUnavailable {
            target: 3,
            reference: 0,
            epoch: 0.0,
            detail: "SPICE(SPKINSUFFDATA)".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("object ID 3"));
        assert!(msg.contains("object ID 0"));
    }
}
