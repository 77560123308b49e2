//! # Orrery
//!
//! Kernel lifecycle and state-query routing over an ephemeris toolkit.
//!
//! The numerical work (trajectory interpolation, kernel decoding, leap-second
//! tables) belongs to a [`toolkit::Toolkit`]. Orrery keeps track of which
//! kernels are loaded and which objects they supply, checks coverage before
//! querying, converts civil time to ephemeris time, and turns the toolkit's
//! sticky error flag into [`orrery_errors::OrreryError`] values.
//!
//! ## Modules
//!
//! * [`orrery`] – The [`orrery::Orrery`] facade, entry point of every operation.
//! * [`registry`], [`coverage`] – Loaded kernels and object coverage.
//! * [`directory`], [`time`] – Name ↔ ID lookups and time conversion.
//! * [`query`], [`frames`], [`state_vector`] – Query inputs and outputs.
//! * [`toolkit`] – Engine contract, error translation and, with the default
//!   `sim` feature, the bundled `toolkit::sim::SimToolkit`.
pub mod config;
pub mod constants;
pub mod coverage;
pub mod directory;
pub mod frames;
pub mod kernel;
pub mod orrery;
pub mod orrery_errors;
pub mod query;
pub mod registry;
pub mod state_vector;
pub mod time;
pub mod toolkit;

pub use orrery::Orrery;
pub use orrery_errors::OrreryError;
