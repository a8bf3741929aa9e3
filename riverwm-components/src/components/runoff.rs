//! Monthly-table runoff loader.

use chrono::{Datelike, NaiveDateTime};
use ndarray::Array1;
use std::collections::HashMap;

use riverwm_core::component::RunoffLoader;
use riverwm_core::config::Config;
use riverwm_core::errors::{ModelError, ModelResult};
use riverwm_core::grid::GridProvider;
use riverwm_core::state::ModelState;

/// Per-cell runoff rates for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRunoff {
    pub surface: Array1<f64>,
    pub subsurface: Array1<f64>,
    pub wetland: Array1<f64>,
}

/// Runoff loader backed by an in-memory table keyed by calendar month.
///
/// Each step the month's rates are added into the hillslope forcing arrays;
/// the orchestrator clears those arrays at the end of every step.
#[derive(Debug, Clone, Default)]
pub struct TableRunoff {
    months: HashMap<u32, MonthlyRunoff>,
}

impl TableRunoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, month: u32, runoff: MonthlyRunoff) {
        self.months.insert(month, runoff);
    }

    /// Table with the same rates in all twelve months.
    pub fn uniform(cells: usize, surface: f64, subsurface: f64, wetland: f64) -> Self {
        let mut table = Self::new();
        for month in 1..=12 {
            table.insert(
                month,
                MonthlyRunoff {
                    surface: Array1::from_elem(cells, surface),
                    subsurface: Array1::from_elem(cells, subsurface),
                    wetland: Array1::from_elem(cells, wetland),
                },
            );
        }
        table
    }
}

impl RunoffLoader for TableRunoff {
    fn load(
        &mut self,
        state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        now: NaiveDateTime,
    ) -> ModelResult<()> {
        let month = now.month();
        let entry = self.months.get(&month).ok_or_else(|| {
            ModelError::Configuration(format!("runoff table has no entry for month {month}"))
        })?;
        state.hillslope_surface_runoff += &entry.surface;
        state.hillslope_subsurface_runoff += &entry.subsurface;
        state.hillslope_wetland_runoff += &entry.wetland;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use riverwm_core::grid::RectilinearGrid;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn config() -> Config {
        Config::from_toml_str(
            r#"
                [simulation]
                name = "runoff test"
                start_date = "2000-01-01"
                end_date = "2000-12-31"
                timestep = 86400
            "#,
        )
        .unwrap()
    }

    #[test]
    fn loads_add_rather_than_replace() {
        let mut table = TableRunoff::uniform(2, 1.0, 0.5, 0.25);
        let grid = RectilinearGrid::regular([0.0, 0.0], [1.0, 1.0], 1, 2);
        let mut state = ModelState::zeros(2);

        table.load(&mut state, &grid, &config(), at(2000, 3, 15)).unwrap();
        table.load(&mut state, &grid, &config(), at(2000, 3, 16)).unwrap();
        assert_eq!(state.hillslope_surface_runoff, Array1::from_elem(2, 2.0));
        assert_eq!(state.hillslope_subsurface_runoff, Array1::from_elem(2, 1.0));
        assert_eq!(state.hillslope_wetland_runoff, Array1::from_elem(2, 0.5));
    }

    #[test]
    fn missing_month_is_an_error() {
        let mut table = TableRunoff::new();
        let grid = RectilinearGrid::regular([0.0, 0.0], [1.0, 1.0], 1, 2);
        let mut state = ModelState::zeros(2);
        assert!(table
            .load(&mut state, &grid, &config(), at(2000, 3, 15))
            .is_err());
    }
}
