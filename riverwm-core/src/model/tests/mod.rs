//! Scenario tests for the orchestrator: lifecycle stepping, periodic
//! triggers, the exchange protocol, restart resumption and grid projections.

mod exchange;
mod triggers;

use ndarray::Array1;

use crate::config::Config;
use crate::grid::RectilinearGrid;
use crate::scheduler::StreamflowSchedule;

/// A 2x2 test grid (4 cells).
pub(crate) fn grid4() -> RectilinearGrid {
    RectilinearGrid::regular([30.0, -120.0], [0.5, 0.5], 2, 2)
}

/// Minimal configuration: no forcing files, no water management.
pub(crate) fn plain_config(start: &str, end: &str, timestep: u64) -> Config {
    Config::from_toml_str(&format!(
        r#"
            [simulation]
            name = "orchestrator test"
            start_date = "{start}"
            end_date = "{end}"
            timestep = {timestep}
        "#
    ))
    .unwrap()
}

/// Full configuration: file-driven runoff and demand, water management on.
pub(crate) fn wm_config(start: &str, end: &str, timestep: u64) -> Config {
    Config::from_toml_str(&format!(
        r#"
            [simulation]
            name = "orchestrator test"
            start_date = "{start}"
            end_date = "{end}"
            timestep = {timestep}

            [runoff]
            read_from_file = true

            [water_management]
            enabled = true

            [water_management.demand]
            read_from_file = true

            [water_management.reservoirs]
            streamflow_time_resolution = "month"
        "#
    ))
    .unwrap()
}

/// A monthly schedule covering all twelve months; the scheduled value for
/// month `m` is `base * m` in every cell.
pub(crate) fn monthly_schedule(cells: usize, base: f64) -> StreamflowSchedule {
    let mut schedule = StreamflowSchedule::new(crate::config::TimeResolution::Month);
    for month in 1..=12 {
        schedule.insert(month, Array1::from_elem(cells, base * month as f64));
    }
    schedule
}
