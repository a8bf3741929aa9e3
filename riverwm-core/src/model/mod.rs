//! The timestep orchestrator and its coupling surface.
//!
//! The [`Model`] owns the lifecycle state machine
//! (`Unconfigured -> Initialized -> Running -> Finalized`), the clock, the
//! state arrays and the injected collaborators. It sequences one simulation
//! step as a fixed in-order pipeline: ingest forcings, fire the periodic
//! demand/release trigger, zero accumulators, refresh the reservoir inflow
//! field, invoke routing, advance the clock, flush output, and clear the
//! forcing accumulators.
//!
//! The variable exchange protocol (`get_value` / `set_value` and friends) is
//! independent of step execution and may be invoked at any time between
//! steps.

mod builder;
mod exchange;
mod null_component;
mod runtime;
mod version;

#[cfg(test)]
mod tests;

// Public re-exports
pub use builder::ModelBuilder;
pub use exchange::ExchangeStatus;
pub use runtime::{Model, Phase};
pub use version::VersionInfo;
