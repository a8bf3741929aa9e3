//! Facade crate for the riverwm workspace.
//!
//! Re-exports the orchestrator core and the bundled components so embedding
//! applications can depend on a single crate. The typical entry points are
//! [`ModelBuilder`] for wiring a run together and [`Model`] for driving it.

pub use riverwm_components as components;
pub use riverwm_core as core;

pub use riverwm_core::config::Config;
pub use riverwm_core::errors::{ModelError, ModelResult};
pub use riverwm_core::grid::{GridProvider, RectilinearGrid};
pub use riverwm_core::model::{ExchangeStatus, Model, ModelBuilder, Phase};
pub use riverwm_core::state::{ModelState, RestartSnapshot};

// Re-export the array and calendar crates used throughout the public API so
// callers can name the exact versions the workspace was built against.
pub use chrono;
pub use ndarray;
