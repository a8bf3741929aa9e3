//! Collaborator interfaces consumed by the orchestrator.
//!
//! The core owns sequencing only. The physical routing algorithm, the
//! forcing loaders, the reservoir release rule and output writing are
//! external collaborators behind these narrow seams, injected through the
//! [`ModelBuilder`](crate::model::ModelBuilder). All calls are made from the
//! single thread driving the state machine; implementations may mutate the
//! state arrays in place but must never touch the clock.

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::errors::ModelResult;
use crate::grid::GridProvider;
use crate::state::ModelState;

/// Ingests runoff forcing for the step at `now`.
///
/// Invoked every step when `runoff.read_from_file` is set. Loaders add into
/// the hillslope runoff arrays; the orchestrator zeroes them after each step.
pub trait RunoffLoader {
    fn load(
        &mut self,
        state: &mut ModelState,
        grid: &dyn GridProvider,
        config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()>;
}

/// Reloads the demand rate at period boundaries.
pub trait DemandLoader {
    fn load(&mut self, state: &mut ModelState, config: &Config, now: NaiveDateTime)
        -> ModelResult<()>;
}

/// Recomputes reservoir releases after a demand reload.
pub trait ReservoirOperator {
    fn recompute_releases(
        &mut self,
        state: &mut ModelState,
        grid: &dyn GridProvider,
        config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()>;
}

/// The external physical computation advancing per-cell state by one step.
///
/// Opaque to the core: it is expected to mutate the state arrays in place.
pub trait RoutingComponent {
    fn solve(
        &mut self,
        state: &mut ModelState,
        grid: &dyn GridProvider,
        config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()>;
}

/// Accumulates and flushes output, and conditionally persists restart
/// snapshots. All I/O blocks the calling thread.
pub trait OutputHandler {
    /// Prepare accumulation buffers before the first step.
    fn initialize(&mut self, config: &Config, cell_count: usize) -> ModelResult<()>;

    /// Called once per step, after the clock has advanced past the step.
    fn update(&mut self, state: &ModelState, now: NaiveDateTime) -> ModelResult<()>;

    /// Flush anything still buffered. Called exactly once, at finalize.
    fn finalize(&mut self) -> ModelResult<()>;
}
