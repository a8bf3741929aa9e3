//! Monthly-table demand loader.

use chrono::{Datelike, NaiveDateTime};
use ndarray::Array1;
use std::collections::HashMap;

use riverwm_core::component::DemandLoader;
use riverwm_core::config::Config;
use riverwm_core::errors::{ModelError, ModelResult};
use riverwm_core::state::ModelState;

/// Demand loader backed by an in-memory table keyed by calendar month.
///
/// Invoked by the orchestrator only at the run start and at calendar-month
/// boundaries; the loaded rate replaces the previous period's rate.
#[derive(Debug, Clone, Default)]
pub struct TableDemand {
    months: HashMap<u32, Array1<f64>>,
}

impl TableDemand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, month: u32, rate: Array1<f64>) {
        self.months.insert(month, rate);
    }

    /// Table with the same per-cell rate in all twelve months.
    pub fn uniform(cells: usize, rate: f64) -> Self {
        let mut table = Self::new();
        for month in 1..=12 {
            table.insert(month, Array1::from_elem(cells, rate));
        }
        table
    }
}

impl DemandLoader for TableDemand {
    fn load(
        &mut self,
        state: &mut ModelState,
        _config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()> {
        let month = now.month();
        let rate = self.months.get(&month).ok_or_else(|| {
            ModelError::Configuration(format!("demand table has no entry for month {month}"))
        })?;
        state.grid_cell_demand_rate.assign(rate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn load_replaces_the_previous_rate() {
        let mut table = TableDemand::new();
        table.insert(1, Array1::from_elem(2, 3.0));
        table.insert(2, Array1::from_elem(2, 5.0));
        let config = Config::from_toml_str(
            r#"
                [simulation]
                name = "demand test"
                start_date = "2000-01-01"
                end_date = "2000-12-31"
                timestep = 86400
            "#,
        )
        .unwrap();

        let mut state = ModelState::zeros(2);
        let january = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        table.load(&mut state, &config, january).unwrap();
        assert_eq!(state.grid_cell_demand_rate, Array1::from_elem(2, 3.0));

        let february = NaiveDate::from_ymd_opt(2000, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        table.load(&mut state, &config, february).unwrap();
        assert_eq!(state.grid_cell_demand_rate, Array1::from_elem(2, 5.0));
    }
}
