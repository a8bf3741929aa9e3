//! Per-cell simulation state arrays and restart snapshots.
//!
//! One `Array1<f64>` per physical quantity, length equal to the grid cell
//! count, indexed by the stable cell id shared with the grid provider.
//! Arrays are allocated fresh at initialization (or restored from a restart
//! snapshot), mutated in place every step by routing and by the scheduler's
//! zeroing/reload logic, and read by the variable exchange protocol at any
//! time between steps.

use chrono::NaiveDate;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The live state arrays of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    /// Surface runoff forcing, added to by the runoff loader (mm/s)
    pub hillslope_surface_runoff: Array1<f64>,
    /// Subsurface runoff forcing (mm/s)
    pub hillslope_subsurface_runoff: Array1<f64>,
    /// Wetland runoff forcing (mm/s)
    pub hillslope_wetland_runoff: Array1<f64>,
    /// Water supplied to demand within the step (m^3/s)
    pub grid_cell_supply: Array1<f64>,
    /// Demand left unmet within the step (m^3)
    pub grid_cell_unmet_demand: Array1<f64>,
    /// Demand rate loaded at period boundaries (m^3/s)
    pub grid_cell_demand_rate: Array1<f64>,
    /// Channel outflow (streamflow) produced by routing (m^3/s)
    pub channel_outflow: Array1<f64>,
    /// Reservoir inflow for the current schedule period (m^3/s)
    pub reservoir_streamflow: Array1<f64>,
}

impl ModelState {
    /// Fresh zero state for a grid of `cell_count` cells.
    pub fn zeros(cell_count: usize) -> Self {
        Self {
            hillslope_surface_runoff: Array1::zeros(cell_count),
            hillslope_subsurface_runoff: Array1::zeros(cell_count),
            hillslope_wetland_runoff: Array1::zeros(cell_count),
            grid_cell_supply: Array1::zeros(cell_count),
            grid_cell_unmet_demand: Array1::zeros(cell_count),
            grid_cell_demand_rate: Array1::zeros(cell_count),
            channel_outflow: Array1::zeros(cell_count),
            reservoir_streamflow: Array1::zeros(cell_count),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.channel_outflow.len()
    }

    /// Zero the per-step water balance accumulators (supply, unmet demand).
    pub fn zero_water_balance(&mut self) {
        self.grid_cell_supply.fill(0.0);
        self.grid_cell_unmet_demand.fill(0.0);
    }

    /// Zero the external forcing accumulators so stale runoff cannot leak
    /// into the next step. Loaders add into these arrays rather than
    /// replacing them.
    pub fn zero_runoff_inputs(&mut self) {
        self.hillslope_surface_runoff.fill(0.0);
        self.hillslope_subsurface_runoff.fill(0.0);
        self.hillslope_wetland_runoff.fill(0.0);
    }

    /// Capture a restart snapshot of this state tagged with a calendar date.
    pub fn to_snapshot(&self, date: NaiveDate) -> RestartSnapshot {
        RestartSnapshot {
            date,
            state: self.clone(),
        }
    }
}

/// A persisted full copy of simulation state, enabling resumption at a later
/// date without replaying prior steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestartSnapshot {
    /// Date the snapshot was taken; becomes the resumed `current_time`
    pub date: NaiveDate,
    pub state: ModelState,
}

impl RestartSnapshot {
    /// Recover the state arrays, consuming the snapshot.
    pub fn restore(self) -> ModelState {
        self.state
    }
}

/// Extract the `YYYY_MM_DD` date token embedded in a restart file name.
///
/// Returns `None` when no parseable token is present; the caller falls back
/// to the configured start date with a logged warning.
pub fn parse_snapshot_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    // Scan for a 10-character window shaped like 1234_56_78.
    for window in 0..name.len().saturating_sub(9) {
        let Some(candidate) = name.get(window..window + 10) else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(candidate, "%Y_%m_%d") {
            return Some(date);
        }
    }
    None
}
