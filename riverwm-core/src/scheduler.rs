//! Periodic input scheduling.
//!
//! Trigger state is derived, never stored: every decision here is a pure
//! function of the current time, the run start, and the configured period
//! granularity. The orchestrator calls [`demand_reload_due`] once per step
//! to decide whether demand must be reloaded and reservoir releases
//! recomputed.
//!
//! The demand/release trigger is deliberately coarse-grained to
//! calendar-month boundaries even when the streamflow schedule is weekly;
//! see the design notes in DESIGN.md before generalizing it.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use ndarray::Array1;
use std::collections::HashMap;

use crate::config::TimeResolution;
use crate::errors::{ModelError, ModelResult};

/// Is `now` the very start of the run?
pub fn is_run_start(now: NaiveDateTime, start: NaiveDateTime) -> bool {
    now == start
}

/// Is `now` the first instant of a calendar month?
pub fn is_month_start(now: NaiveDateTime) -> bool {
    now.day() == 1 && now.time() == NaiveTime::MIN
}

/// Decide whether demand reload and reservoir release recomputation are due.
///
/// Fires exactly at the start instant of the run and at the first instant of
/// every calendar month, and at no other step.
pub fn demand_reload_due(now: NaiveDateTime, start: NaiveDateTime) -> bool {
    is_run_start(now, start) || is_month_start(now)
}

/// CDC epidemiological week number of a date.
///
/// Weeks start on Sunday; week 1 is the first week of the year containing at
/// least four days of January. Dates in the final days of December may
/// belong to week 1 of the following year, and early-January dates to week
/// 52/53 of the previous one.
pub fn epiweek(date: NaiveDate) -> u32 {
    let week_start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    // Candidate epi-years whose week 1 could contain this week.
    for year in [date.year() + 1, date.year(), date.year() - 1] {
        let first = first_epiweek_start(year);
        if week_start >= first {
            return ((week_start - first).num_days() / 7) as u32 + 1;
        }
    }
    unreachable!("every date falls after some year's first epiweek");
}

/// Sunday starting epiweek 1 of `year`.
fn first_epiweek_start(year: i32) -> NaiveDate {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date");
    let sunday_on_or_before = jan1 - Duration::days(jan1.weekday().num_days_from_sunday() as i64);
    // That week counts as week 1 only when it holds at least four January
    // days, i.e. when Jan 1 falls on Sunday through Wednesday.
    match jan1.weekday() {
        Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed => sunday_on_or_before,
        _ => sunday_on_or_before + Duration::days(7),
    }
}

/// Index of the schedule period containing `now` for a given resolution.
pub fn period_key(now: NaiveDateTime, resolution: TimeResolution) -> u32 {
    match resolution {
        TimeResolution::Month => now.month(),
        TimeResolution::Epiweek => epiweek(now.date()),
    }
}

/// Precomputed reservoir streamflow, one per-cell array per period key.
///
/// Keys are calendar months (1..=12) or epiweeks (1..=53) depending on the
/// configured resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamflowSchedule {
    resolution: TimeResolution,
    periods: HashMap<u32, Array1<f64>>,
}

impl StreamflowSchedule {
    pub fn new(resolution: TimeResolution) -> Self {
        Self {
            resolution,
            periods: HashMap::new(),
        }
    }

    pub fn resolution(&self) -> TimeResolution {
        self.resolution
    }

    /// Register the per-cell streamflow for one period key.
    pub fn insert(&mut self, key: u32, values: Array1<f64>) {
        self.periods.insert(key, values);
    }

    /// The per-cell streamflow for the period containing `now`.
    ///
    /// A missing period is a configuration-tier failure: the schedule was
    /// declared but does not cover the simulated span.
    pub fn slice_for(&self, now: NaiveDateTime) -> ModelResult<&Array1<f64>> {
        let key = period_key(now, self.resolution);
        self.periods.get(&key).ok_or(ModelError::ScheduleGap(key))
    }
}
