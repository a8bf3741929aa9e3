#![allow(dead_code)]

//! Instrumented collaborators used by the orchestrator tests.

use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::component::{
    DemandLoader, OutputHandler, ReservoirOperator, RoutingComponent, RunoffLoader,
};
use crate::config::Config;
use crate::errors::{ModelError, ModelResult};
use crate::grid::GridProvider;
use crate::state::ModelState;

/// Runoff loader that adds a constant rate and counts its invocations.
pub(crate) struct CountingRunoff {
    pub calls: Arc<AtomicUsize>,
    pub rate: f64,
}

impl RunoffLoader for CountingRunoff {
    fn load(
        &mut self,
        state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        state.hillslope_surface_runoff += self.rate;
        Ok(())
    }
}

/// Demand loader that overwrites the demand rate and counts invocations.
pub(crate) struct CountingDemand {
    pub calls: Arc<AtomicUsize>,
    pub rate: f64,
}

impl DemandLoader for CountingDemand {
    fn load(
        &mut self,
        state: &mut ModelState,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        state.grid_cell_demand_rate.fill(self.rate);
        Ok(())
    }
}

/// Reservoir operator that only counts invocations.
pub(crate) struct CountingReservoirs {
    pub calls: Arc<AtomicUsize>,
}

impl ReservoirOperator for CountingReservoirs {
    fn recompute_releases(
        &mut self,
        _state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Routing that drains the hillslope forcings into channel outflow.
///
/// Lets tests observe both the routing invocation and the end-of-step
/// forcing zeroing.
#[derive(Default)]
pub(crate) struct DrainRouting {}

impl RoutingComponent for DrainRouting {
    fn solve(
        &mut self,
        state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        let inflow = &state.hillslope_surface_runoff
            + &state.hillslope_subsurface_runoff
            + &state.hillslope_wetland_runoff;
        state.channel_outflow += &inflow;
        Ok(())
    }
}

/// Routing that always fails, for the fatal-error path.
#[derive(Default)]
pub(crate) struct FailingRouting {}

impl RoutingComponent for FailingRouting {
    fn solve(
        &mut self,
        _state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        Err(ModelError::collaborator(
            "routing",
            std::io::Error::new(std::io::ErrorKind::Other, "numerical blow-up"),
        ))
    }
}

/// Output handler that counts steps and remembers the last flush time.
#[derive(Default)]
pub(crate) struct RecordingOutput {
    pub steps: Arc<AtomicUsize>,
    pub finalized: Arc<AtomicUsize>,
}

impl OutputHandler for RecordingOutput {
    fn initialize(&mut self, _config: &Config, _cell_count: usize) -> ModelResult<()> {
        Ok(())
    }

    fn update(&mut self, _state: &ModelState, _now: NaiveDateTime) -> ModelResult<()> {
        self.steps.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finalize(&mut self) -> ModelResult<()> {
        self.finalized.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
