//! Simulation clock.
//!
//! Converts between calendar time and the monotonic simulation-time
//! representation used by the coupling protocol (seconds since the Unix
//! epoch). The clock is owned exclusively by the orchestrator; collaborators
//! receive timestamps by value and cannot advance it.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::Config;
use crate::errors::{ModelError, ModelResult};

/// Monotonic calendar clock for a single run.
///
/// `current_time` only moves forward, by exactly one step per
/// [`advance`](SimulationClock::advance), and is reset only when a new clock
/// is constructed at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    current_time: NaiveDateTime,
    step: Duration,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

/// Final second of a day, the end-of-run convention for `end_date`.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"))
}

impl SimulationClock {
    /// Build a clock from a validated configuration.
    ///
    /// The run starts at midnight of `start_date` and ends at the final
    /// second of `end_date`. Fails with [`ModelError::Configuration`] when
    /// the dates are mis-ordered or the timestep is zero.
    pub fn from_config(config: &Config) -> ModelResult<Self> {
        let sim = &config.simulation;
        if sim.end_date < sim.start_date {
            return Err(ModelError::Configuration(format!(
                "configured `end_date` {} is prior to configured `start_date` {}",
                sim.end_date, sim.start_date
            )));
        }
        if sim.timestep == 0 {
            return Err(ModelError::Configuration(
                "`timestep` must be a positive number of seconds".to_string(),
            ));
        }
        let start_time = sim.start_date.and_time(NaiveTime::MIN);
        Ok(Self {
            current_time: start_time,
            step: Duration::seconds(sim.timestep as i64),
            start_time,
            end_time: end_of_day(sim.end_date),
        })
    }

    /// Resume from a restart snapshot: `current_time` becomes midnight of the
    /// snapshot's embedded date, overriding the configured start date. The
    /// run's nominal start and end bounds are unchanged.
    pub fn with_restart_date(mut self, date: NaiveDate) -> Self {
        self.current_time = date.and_time(NaiveTime::MIN);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.current_time
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Step size in seconds.
    pub fn step_seconds(&self) -> f64 {
        self.step.num_seconds() as f64
    }

    /// Current time as seconds since the Unix epoch.
    pub fn now_seconds(&self) -> f64 {
        self.current_time.and_utc().timestamp() as f64
    }

    /// Run start as seconds since the Unix epoch.
    pub fn start_seconds(&self) -> f64 {
        self.start_time.and_utc().timestamp() as f64
    }

    /// Run end as seconds since the Unix epoch.
    pub fn end_seconds(&self) -> f64 {
        self.end_time.and_utc().timestamp() as f64
    }

    /// Advance the clock by exactly one step.
    pub fn advance(&mut self) {
        self.current_time += self.step;
    }

    /// Run-until check: has the clock reached or passed `target`?
    pub fn at_or_after(&self, target: NaiveDateTime) -> bool {
        self.current_time >= target
    }
}
