//! Model builder: the `initialize` half of the lifecycle.
//!
//! Construction performs the whole initialization sequence — configuration
//! validation, run-name derivation, best-effort version probe, parallelism
//! detection, clock construction (with restart override), state allocation
//! or restoration, and output preparation. Any failure aborts the build and
//! no partial model is returned.

use log::{info, warn};

use crate::clock::SimulationClock;
use crate::component::{
    DemandLoader, OutputHandler, ReservoirOperator, RoutingComponent, RunoffLoader,
};
use crate::config::Config;
use crate::errors::{ModelError, ModelResult};
use crate::grid::GridProvider;
use crate::scheduler::StreamflowSchedule;
use crate::state::{parse_snapshot_date, ModelState, RestartSnapshot};

use super::null_component::{NullOutput, NullRouting};
use super::runtime::{Model, Phase};
use super::version::VersionInfo;

/// Build a new model from a configuration, a grid provider and a set of
/// collaborators.
#[derive(Default)]
pub struct ModelBuilder {
    config: Option<Config>,
    grid: Option<Box<dyn GridProvider>>,
    state: Option<ModelState>,
    restart: Option<RestartSnapshot>,
    runoff_loader: Option<Box<dyn RunoffLoader>>,
    demand_loader: Option<Box<dyn DemandLoader>>,
    reservoir_operator: Option<Box<dyn ReservoirOperator>>,
    routing: Option<Box<dyn RoutingComponent>>,
    output: Option<Box<dyn OutputHandler>>,
    streamflow_schedule: Option<StreamflowSchedule>,
}

impl ModelBuilder {
    /// Create a new model builder with no collaborators attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_grid(mut self, grid: impl GridProvider + 'static) -> Self {
        self.grid = Some(Box::new(grid));
        self
    }

    /// Warm-start from pre-built state arrays. The clock still starts at the
    /// configured start date; use [`with_restart_snapshot`](Self::with_restart_snapshot)
    /// to also override the start time.
    pub fn with_state(mut self, state: ModelState) -> Self {
        self.state = Some(state);
        self
    }

    /// Warm-start from an in-memory restart snapshot; the snapshot's date
    /// overrides the configured start date.
    pub fn with_restart_snapshot(mut self, snapshot: RestartSnapshot) -> Self {
        self.restart = Some(snapshot);
        self
    }

    pub fn with_runoff_loader(mut self, loader: impl RunoffLoader + 'static) -> Self {
        self.runoff_loader = Some(Box::new(loader));
        self
    }

    pub fn with_demand_loader(mut self, loader: impl DemandLoader + 'static) -> Self {
        self.demand_loader = Some(Box::new(loader));
        self
    }

    pub fn with_reservoir_operator(mut self, operator: impl ReservoirOperator + 'static) -> Self {
        self.reservoir_operator = Some(Box::new(operator));
        self
    }

    pub fn with_routing(mut self, routing: impl RoutingComponent + 'static) -> Self {
        self.routing = Some(Box::new(routing));
        self
    }

    pub fn with_output(mut self, output: impl OutputHandler + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    pub fn with_streamflow_schedule(mut self, schedule: StreamflowSchedule) -> Self {
        self.streamflow_schedule = Some(schedule);
        self
    }

    /// Build an initialized model.
    ///
    /// Fails with [`ModelError::Configuration`] when the configuration is
    /// invalid or a collaborator the configuration requires was not
    /// provided. On success the model is in the `Initialized` phase.
    pub fn build(self) -> ModelResult<Model> {
        let config = self
            .config
            .ok_or_else(|| ModelError::Configuration("a configuration is required".to_string()))?;
        config.validate()?;
        let name = config.sanitized_name();
        info!("initializing model `{name}`");

        let version = VersionInfo::detect();
        match &version {
            Some(v) => {
                info!("version: {}", v.revision);
                for file in &v.uncommitted {
                    info!("  * uncommitted: {file}");
                }
            }
            None => info!("version: unavailable"),
        }

        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        info!("cores: {cores}");

        let grid = self
            .grid
            .ok_or_else(|| ModelError::Configuration("a grid provider is required".to_string()))?;

        let mut clock = SimulationClock::from_config(&config)?;
        let state = if let Some(snapshot) = self.restart {
            clock = clock.with_restart_date(snapshot.date);
            snapshot.restore()
        } else if let Some(state) = self.state {
            state
        } else if let Some(path) = &config.simulation.restart_file {
            info!("loading restart file from `{}`", path.display());
            match parse_snapshot_date(path) {
                Some(date) => clock = clock.with_restart_date(date),
                None => warn!(
                    "unable to parse date from restart file name, falling back to configured start date"
                ),
            }
            let document = std::fs::read_to_string(path)?;
            let snapshot: RestartSnapshot = toml::from_str(&document)
                .map_err(|e| ModelError::Configuration(format!("unreadable restart file: {e}")))?;
            snapshot.restore()
        } else {
            ModelState::zeros(grid.cell_count())
        };

        if state.cell_count() != grid.cell_count() {
            return Err(ModelError::Configuration(format!(
                "state has {} cells but the grid has {}",
                state.cell_count(),
                grid.cell_count()
            )));
        }

        let wm = &config.water_management;
        if config.runoff.read_from_file && self.runoff_loader.is_none() {
            return Err(ModelError::Configuration(
                "`runoff.read_from_file` is set but no runoff loader was provided".to_string(),
            ));
        }
        if wm.enabled && wm.demand.read_from_file && self.demand_loader.is_none() {
            return Err(ModelError::Configuration(
                "`water_management.demand.read_from_file` is set but no demand loader was provided"
                    .to_string(),
            ));
        }
        if wm.enabled && wm.demand.read_from_file && self.reservoir_operator.is_none() {
            return Err(ModelError::Configuration(
                "water management is enabled but no reservoir operator was provided".to_string(),
            ));
        }
        if wm.enabled && self.streamflow_schedule.is_none() {
            return Err(ModelError::Configuration(
                "water management is enabled but no streamflow schedule was provided".to_string(),
            ));
        }

        let mut output = self.output.unwrap_or_else(|| Box::new(NullOutput::default()));
        output.initialize(&config, grid.cell_count())?;

        info!("model `{name}` initialized at {}", clock.now());
        Ok(Model {
            config,
            name,
            clock,
            grid,
            state,
            phase: Phase::Initialized,
            cores,
            version,
            runoff_loader: self.runoff_loader,
            demand_loader: self.demand_loader,
            reservoir_operator: self.reservoir_operator,
            routing: self
                .routing
                .unwrap_or_else(|| Box::new(NullRouting::default())),
            output,
            streamflow_schedule: self.streamflow_schedule,
        })
    }
}
