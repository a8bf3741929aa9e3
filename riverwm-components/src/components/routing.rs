//! Mass-conserving pass-through router.

use chrono::NaiveDateTime;

use riverwm_core::component::RoutingComponent;
use riverwm_core::config::Config;
use riverwm_core::errors::ModelResult;
use riverwm_core::grid::GridProvider;
use riverwm_core::state::ModelState;

/// Moves the step's hillslope forcings straight into channel outflow and
/// settles demand against the reservoir release.
///
/// Explicitly not a transport solver: there is no flow network, no storage
/// and no kinematic wave. It exists to exercise the orchestrator and to
/// serve as a template for a real routing component.
#[derive(Debug, Clone, Default)]
pub struct PassthroughRouting {}

impl PassthroughRouting {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoutingComponent for PassthroughRouting {
    fn solve(
        &mut self,
        state: &mut ModelState,
        _grid: &dyn GridProvider,
        config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        let step_seconds = config.simulation.timestep as f64;
        for cell in 0..state.cell_count() {
            let inflow = state.hillslope_surface_runoff[cell]
                + state.hillslope_subsurface_runoff[cell]
                + state.hillslope_wetland_runoff[cell];
            state.channel_outflow[cell] = inflow;

            let demand = state.grid_cell_demand_rate[cell];
            let available = state.reservoir_streamflow[cell];
            let supplied = demand.min(available);
            state.grid_cell_supply[cell] = supplied;
            state.grid_cell_unmet_demand[cell] = (demand - supplied) * step_seconds;
        }
        Ok(())
    }
}
