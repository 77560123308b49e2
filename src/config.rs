//! # Orrery configuration
//!
//! [`OrreryConfig`] gathers the knobs of an [`Orrery`](crate::orrery::Orrery)
//! handle. It can be deserialized (every field has a default) or assembled
//! with the validating [`OrreryConfigBuilder`].
//!
//! ## Example
//!
//! ```rust
//! use orrery::config::OrreryConfig;
//! use orrery::frames::{AberrationCorrection, ReferenceFrame};
//!
//! let config = OrreryConfig::builder()
//!     .default_frame(ReferenceFrame::EclipJ2000)
//!     .default_aberration(AberrationCorrection::LightTime)
//!     .coverage_precheck(false)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_object_ids, 500);
//! ```
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::MAX_OBJECT_IDS,
    frames::{AberrationCorrection, ReferenceFrame},
    orrery_errors::OrreryError,
};

/// Settings of an Orrery handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Frame used when a query names none.
    pub default_frame: ReferenceFrame,
    /// Correction used when a query names none.
    pub default_aberration: AberrationCorrection,
    /// Capacity of the per-file object enumeration.
    pub max_object_ids: usize,
    /// Extensions (without dot, any case) of trajectory kernels.
    pub trajectory_extensions: Vec<String>,
    /// Extensions (without dot, any case) of leap-second kernels.
    pub leap_second_extensions: Vec<String>,
    /// Refuse states of objects no loaded trajectory kernel supplies before
    /// asking the toolkit.
    pub coverage_precheck: bool,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        OrreryConfig {
            default_frame: ReferenceFrame::J2000,
            default_aberration: AberrationCorrection::None,
            max_object_ids: MAX_OBJECT_IDS,
            trajectory_extensions: vec!["bsp".into()],
            leap_second_extensions: vec!["tls".into()],
            coverage_precheck: true,
        }
    }
}

impl OrreryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> OrreryConfigBuilder {
        OrreryConfigBuilder::new()
    }

    /// Check the invariants enforced by [`OrreryConfigBuilder::build`].
    ///
    /// Deserialized configurations bypass the builder, call this before use.
    pub fn validate(&self) -> Result<(), OrreryError> {
        if self.max_object_ids == 0 {
            return Err(OrreryError::InvalidConfig(
                "max_object_ids must be >= 1".into(),
            ));
        }
        check_extensions("trajectory_extensions", &self.trajectory_extensions)?;
        check_extensions("leap_second_extensions", &self.leap_second_extensions)?;

        let shared = self
            .trajectory_extensions
            .iter()
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| {
                self.leap_second_extensions
                    .iter()
                    .any(|l| l.eq_ignore_ascii_case(e))
            })
            .unique()
            .join(", ");
        if !shared.is_empty() {
            return Err(OrreryError::InvalidConfig(format!(
                "extensions listed as both trajectory and leap-second kernels: {shared}"
            )));
        }
        Ok(())
    }
}

fn check_extensions(field: &str, list: &[String]) -> Result<(), OrreryError> {
    if list.is_empty() {
        return Err(OrreryError::InvalidConfig(format!(
            "{field} must not be empty"
        )));
    }
    if let Some(bad) = list
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.') || e.contains(char::is_whitespace))
    {
        return Err(OrreryError::InvalidConfig(format!(
            "{field}: invalid extension {bad:?} (expected e.g. \"bsp\")"
        )));
    }
    Ok(())
}

/// Builder for [`OrreryConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct OrreryConfigBuilder {
    config: OrreryConfig,
}

impl OrreryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_frame(mut self, v: ReferenceFrame) -> Self {
        self.config.default_frame = v;
        self
    }

    pub fn default_aberration(mut self, v: AberrationCorrection) -> Self {
        self.config.default_aberration = v;
        self
    }

    pub fn max_object_ids(mut self, v: usize) -> Self {
        self.config.max_object_ids = v;
        self
    }

    pub fn trajectory_extensions<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.trajectory_extensions = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn leap_second_extensions<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.leap_second_extensions = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn coverage_precheck(mut self, v: bool) -> Self {
        self.config.coverage_precheck = v;
        self
    }

    /// Finalize the configuration.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_object_ids >= 1`.
    /// * Both extension lists are non-empty, with no blank, dotted or
    ///   whitespace-carrying entries.
    /// * No extension is both a trajectory and a leap-second extension.
    ///
    /// Return
    /// ----------
    /// * `Ok(OrreryConfig)`, or [`OrreryError::InvalidConfig`] naming the first broken rule.
    pub fn build(self) -> Result<OrreryConfig, OrreryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
