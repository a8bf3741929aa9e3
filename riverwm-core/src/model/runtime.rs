//! Model struct and lifecycle execution.

use chrono::NaiveDateTime;
use log::{debug, error, info};

use crate::clock::SimulationClock;
use crate::component::{
    DemandLoader, OutputHandler, ReservoirOperator, RoutingComponent, RunoffLoader,
};
use crate::config::Config;
use crate::errors::{ModelError, ModelResult};
use crate::grid::GridProvider;
use crate::scheduler::{self, StreamflowSchedule};
use crate::state::ModelState;

use super::version::VersionInfo;

/// Lifecycle state of a model instance.
///
/// `Initialized` is terminal-until-first-update; `Running` is re-entrant
/// (every `update` call is one transition that stays in `Running`);
/// `Finalized` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Initialized,
    Running,
    Finalized,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unconfigured => "Unconfigured",
            Phase::Initialized => "Initialized",
            Phase::Running => "Running",
            Phase::Finalized => "Finalized",
        }
    }
}

/// The simulation lifecycle controller.
///
/// Owns the clock, the per-cell state arrays and the injected collaborators,
/// and sequences `initialize` / `update` / `update_until` / `finalize`.
/// Construction goes through [`ModelBuilder`](super::ModelBuilder); a
/// successfully built model is always in the `Initialized` phase with no
/// partial state.
///
/// A single logical thread must drive the state machine; calls are strictly
/// sequential and not reentrant.
pub struct Model {
    pub(crate) config: Config,
    pub(crate) name: String,
    pub(crate) clock: SimulationClock,
    pub(crate) grid: Box<dyn GridProvider>,
    pub(crate) state: ModelState,
    pub(crate) phase: Phase,
    pub(crate) cores: usize,
    pub(crate) version: Option<VersionInfo>,
    pub(crate) runoff_loader: Option<Box<dyn RunoffLoader>>,
    pub(crate) demand_loader: Option<Box<dyn DemandLoader>>,
    pub(crate) reservoir_operator: Option<Box<dyn ReservoirOperator>>,
    pub(crate) routing: Box<dyn RoutingComponent>,
    pub(crate) output: Box<dyn OutputHandler>,
    pub(crate) streamflow_schedule: Option<StreamflowSchedule>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("config", &self.config)
            .field("name", &self.name)
            .field("clock", &self.clock)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("cores", &self.cores)
            .field("version", &self.version)
            .field("streamflow_schedule", &self.streamflow_schedule)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Perform one simulation step.
    ///
    /// The step sequence is fixed and in-order with no skipping on partial
    /// failure: forcing ingest, periodic demand/release trigger, accumulator
    /// zeroing, reservoir inflow refresh, routing, clock advance, output
    /// flush, forcing-accumulator zeroing. Any failure is logged with its
    /// stage context and propagated; the model must not be reused after a
    /// failed step.
    pub fn update(&mut self) -> ModelResult<()> {
        self.ensure_active()?;
        let step = self.clock.now();
        info!("begin timestep {step}");
        if let Err(e) = self.step_once() {
            error!("failed to complete timestep {step}: {e}");
            return Err(e);
        }
        self.phase = Phase::Running;
        info!("timestep {step} completed");
        Ok(())
    }

    fn step_once(&mut self) -> ModelResult<()> {
        let now = self.clock.now();

        // 1. Ingest runoff forcing when it is file-driven.
        if self.config.runoff.read_from_file {
            debug!("reading runoff input");
            let loader = self.runoff_loader.as_mut().ok_or_else(|| {
                ModelError::Configuration(
                    "`runoff.read_from_file` is set but no runoff loader was provided".to_string(),
                )
            })?;
            loader.load(&mut self.state, self.grid.as_ref(), &self.config, now)?;
        }

        // 2. Reload demand and recompute reservoir releases at the run start
        //    and at calendar-month boundaries.
        let wm_enabled = self.config.water_management.enabled;
        if wm_enabled
            && self.config.water_management.demand.read_from_file
            && scheduler::demand_reload_due(now, self.clock.start())
        {
            debug!("reading demand rate input");
            let loader = self.demand_loader.as_mut().ok_or_else(|| {
                ModelError::Configuration(
                    "`water_management.demand.read_from_file` is set but no demand loader was provided"
                        .to_string(),
                )
            })?;
            loader.load(&mut self.state, &self.config, now)?;
            let operator = self.reservoir_operator.as_mut().ok_or_else(|| {
                ModelError::Configuration(
                    "water management is enabled but no reservoir operator was provided"
                        .to_string(),
                )
            })?;
            operator.recompute_releases(&mut self.state, self.grid.as_ref(), &self.config, now)?;
        }

        // 3. Zero the per-step water balance accumulators.
        self.state.zero_water_balance();

        // 4. Refresh the reservoir inflow field for the current period.
        if wm_enabled {
            let schedule = self.streamflow_schedule.as_ref().ok_or_else(|| {
                ModelError::Configuration(
                    "water management is enabled but no streamflow schedule was provided"
                        .to_string(),
                )
            })?;
            let slice = schedule.slice_for(now)?;
            self.state.reservoir_streamflow.assign(slice);
        }

        // 5. Routing advances the physical state in place.
        self.routing
            .solve(&mut self.state, self.grid.as_ref(), &self.config, now)?;

        // 6. Advance the clock by exactly one step.
        self.clock.advance();

        // 7. Accumulate/flush output and conditionally persist a restart.
        self.output.update(&self.state, self.clock.now())?;

        // 8. Clear the forcing accumulators; loaders add rather than replace.
        self.state.zero_runoff_inputs();

        Ok(())
    }

    /// Step repeatedly until the clock reaches or passes `target`.
    ///
    /// A target strictly before the current time is logged and ignored
    /// (lenient no-op, not a fatal condition). Never overshoots the target
    /// by more than one step and never partially advances.
    pub fn update_until(&mut self, target: NaiveDateTime) -> ModelResult<()> {
        if target < self.clock.now() {
            error!("`time` is prior to current model time; choose a new `time` and try again");
            return Ok(());
        }
        while !self.clock.at_or_after(target) {
            self.update()?;
        }
        info!("simulation reached {target}");
        Ok(())
    }

    /// Flush output and close the run. Idempotent.
    ///
    /// State arrays are released when the model is dropped; a finalized
    /// model refuses further updates.
    pub fn finalize(&mut self) -> ModelResult<()> {
        if self.phase == Phase::Finalized {
            return Ok(());
        }
        self.output.finalize()?;
        self.phase = Phase::Finalized;
        info!("model finalized");
        Ok(())
    }

    fn ensure_active(&self) -> ModelResult<()> {
        match self.phase {
            Phase::Initialized | Phase::Running => Ok(()),
            other => Err(ModelError::InvalidState {
                expected: "Initialized or Running",
                actual: other.as_str(),
            }),
        }
    }

    /// Current calendar time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Sanitized run name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &dyn GridProvider {
        self.grid.as_ref()
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Detected physical-parallelism hint, forwarded to the routing
    /// component's execution layer. The core performs no parallel dispatch
    /// itself.
    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Repository version metadata, when the probe succeeded.
    pub fn version(&self) -> Option<&VersionInfo> {
        self.version.as_ref()
    }

    /// Capture a restart snapshot of the current state.
    pub fn snapshot(&self) -> crate::state::RestartSnapshot {
        self.state.to_snapshot(self.clock.now().date())
    }
}
