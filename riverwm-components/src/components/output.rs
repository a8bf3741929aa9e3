//! Accumulating in-memory output buffer with restart capture.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;

use riverwm_core::component::OutputHandler;
use riverwm_core::config::Config;
use riverwm_core::errors::ModelResult;
use riverwm_core::state::{ModelState, RestartSnapshot};

/// One flushed output record: the step's end time and the domain-mean
/// channel outflow.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub time: NaiveDateTime,
    pub mean_channel_outflow: f64,
}

/// Output handler that accumulates records in memory and captures a restart
/// snapshot at the first step of every month.
///
/// Stands in for the NetCDF-writing output layer; useful for tests and for
/// embedding callers that post-process in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    records: Vec<OutputRecord>,
    snapshots: Vec<RestartSnapshot>,
    last_snapshot_date: Option<NaiveDate>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn snapshots(&self) -> &[RestartSnapshot] {
        &self.snapshots
    }
}

impl OutputHandler for MemoryOutput {
    fn initialize(&mut self, _config: &Config, _cell_count: usize) -> ModelResult<()> {
        self.records.clear();
        self.snapshots.clear();
        self.last_snapshot_date = None;
        Ok(())
    }

    fn update(&mut self, state: &ModelState, now: NaiveDateTime) -> ModelResult<()> {
        let mean = if state.cell_count() == 0 {
            0.0
        } else {
            state.channel_outflow.sum() / state.cell_count() as f64
        };
        self.records.push(OutputRecord {
            time: now,
            mean_channel_outflow: mean,
        });

        // Persist a restart snapshot once per month, at its first flush.
        let date = now.date();
        let due = match self.last_snapshot_date {
            Some(previous) => {
                (date.year(), date.month()) != (previous.year(), previous.month())
            }
            None => true,
        };
        if due {
            debug!("capturing restart snapshot for {date}");
            self.snapshots.push(state.to_snapshot(date));
            self.last_snapshot_date = Some(date);
        }
        Ok(())
    }

    fn finalize(&mut self) -> ModelResult<()> {
        debug!("output finalized with {} records", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn config() -> Config {
        Config::from_toml_str(
            r#"
                [simulation]
                name = "output test"
                start_date = "2000-01-01"
                end_date = "2000-12-31"
                timestep = 86400
            "#,
        )
        .unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn records_mean_outflow_per_step() {
        let mut output = MemoryOutput::new();
        output.initialize(&config(), 4).unwrap();

        let mut state = ModelState::zeros(4);
        state.channel_outflow = Array1::from_vec(vec![1.0, 2.0, 3.0, 6.0]);
        output.update(&state, at(2000, 1, 2)).unwrap();

        assert_eq!(output.records().len(), 1);
        assert_eq!(output.records()[0].mean_channel_outflow, 3.0);
        assert_eq!(output.records()[0].time, at(2000, 1, 2));
    }

    #[test]
    fn snapshots_are_captured_once_per_month() {
        let mut output = MemoryOutput::new();
        output.initialize(&config(), 2).unwrap();
        let state = ModelState::zeros(2);

        output.update(&state, at(2000, 1, 2)).unwrap();
        output.update(&state, at(2000, 1, 3)).unwrap();
        output.update(&state, at(2000, 2, 1)).unwrap();
        output.update(&state, at(2000, 2, 2)).unwrap();

        let dates: Vec<_> = output.snapshots().iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2000, 2, 1).unwrap()
            ]
        );
    }

    #[test]
    fn initialize_resets_previous_run_buffers() {
        let mut output = MemoryOutput::new();
        output.initialize(&config(), 2).unwrap();
        output.update(&ModelState::zeros(2), at(2000, 1, 2)).unwrap();
        output.initialize(&config(), 2).unwrap();
        assert!(output.records().is_empty());
        assert!(output.snapshots().is_empty());
    }
}
