//! Demand-proportional reservoir release rule.

use chrono::NaiveDateTime;
use log::debug;

use riverwm_core::component::ReservoirOperator;
use riverwm_core::config::Config;
use riverwm_core::errors::ModelResult;
use riverwm_core::grid::GridProvider;
use riverwm_core::state::ModelState;

/// Recomputes reservoir releases as a fixed fraction of the current demand
/// rate.
///
/// A placeholder for the full prerelease rule, which lives outside the core
/// behind the same seam. Runs only when the orchestrator's monthly trigger
/// fires.
#[derive(Debug, Clone)]
pub struct ScheduleReleases {
    /// Fraction of demand satisfied from reservoir storage (0..=1)
    pub release_fraction: f64,
}

impl Default for ScheduleReleases {
    fn default() -> Self {
        Self {
            release_fraction: 0.85,
        }
    }
}

impl ReservoirOperator for ScheduleReleases {
    fn recompute_releases(
        &mut self,
        state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()> {
        debug!("recomputing reservoir releases at {now}");
        for (release, &demand) in state
            .reservoir_streamflow
            .iter_mut()
            .zip(state.grid_cell_demand_rate.iter())
        {
            *release = demand * self.release_fraction;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::Array1;
    use riverwm_core::grid::RectilinearGrid;

    #[test]
    fn release_is_proportional_to_demand() {
        let mut operator = ScheduleReleases {
            release_fraction: 0.5,
        };
        let grid = RectilinearGrid::regular([0.0, 0.0], [1.0, 1.0], 1, 3);
        let config = Config::from_toml_str(
            r#"
                [simulation]
                name = "reservoir test"
                start_date = "2000-01-01"
                end_date = "2000-12-31"
                timestep = 86400
            "#,
        )
        .unwrap();

        let mut state = ModelState::zeros(3);
        state.grid_cell_demand_rate = Array1::from_vec(vec![2.0, 4.0, 0.0]);
        let now = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        operator
            .recompute_releases(&mut state, &grid, &config, now)
            .unwrap();
        assert_eq!(
            state.reservoir_streamflow,
            Array1::from_vec(vec![1.0, 2.0, 0.0])
        );
    }
}
