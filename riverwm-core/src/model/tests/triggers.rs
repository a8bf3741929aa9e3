//! Periodic input scheduling through the orchestrator: demand/release
//! recomputation cadence, schedule refresh, forcing-accumulator zeroing.

use ndarray::Array1;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{grid4, monthly_schedule, wm_config};
use crate::config::TimeResolution;
use crate::errors::ModelError;
use crate::example_components::{
    CountingDemand, CountingReservoirs, CountingRunoff, DrainRouting, RecordingOutput,
};
use crate::model::ModelBuilder;
use crate::scheduler::StreamflowSchedule;

struct Counters {
    runoff: Arc<AtomicUsize>,
    demand: Arc<AtomicUsize>,
    reservoirs: Arc<AtomicUsize>,
    output_steps: Arc<AtomicUsize>,
}

fn wm_model(start: &str, end: &str) -> (crate::model::Model, Counters) {
    let counters = Counters {
        runoff: Arc::new(AtomicUsize::new(0)),
        demand: Arc::new(AtomicUsize::new(0)),
        reservoirs: Arc::new(AtomicUsize::new(0)),
        output_steps: Arc::new(AtomicUsize::new(0)),
    };
    let output = RecordingOutput {
        steps: Arc::clone(&counters.output_steps),
        ..Default::default()
    };
    let model = ModelBuilder::new()
        .with_config(wm_config(start, end, 86400))
        .with_grid(grid4())
        .with_runoff_loader(CountingRunoff {
            calls: Arc::clone(&counters.runoff),
            rate: 2.0,
        })
        .with_demand_loader(CountingDemand {
            calls: Arc::clone(&counters.demand),
            rate: 1.0,
        })
        .with_reservoir_operator(CountingReservoirs {
            calls: Arc::clone(&counters.reservoirs),
        })
        .with_routing(DrainRouting::default())
        .with_output(output)
        .with_streamflow_schedule(monthly_schedule(4, 10.0))
        .build()
        .unwrap();
    (model, counters)
}

#[test]
fn demand_reload_fires_twelve_times_over_a_calendar_year() {
    let (mut model, counters) = wm_model("2001-01-01", "2001-12-31");
    for _ in 0..365 {
        model.update().unwrap();
    }
    // Jan 1 is both run start and a month boundary, counted once; then the
    // first instant of each remaining month.
    assert_eq!(counters.demand.load(Ordering::Relaxed), 12);
    assert_eq!(counters.reservoirs.load(Ordering::Relaxed), 12);
    // Runoff ingest and output flushing happen every step.
    assert_eq!(counters.runoff.load(Ordering::Relaxed), 365);
    assert_eq!(counters.output_steps.load(Ordering::Relaxed), 365);
}

#[test]
fn mid_month_run_start_counts_as_an_extra_firing() {
    let (mut model, counters) = wm_model("2001-01-15", "2002-01-14");
    for _ in 0..365 {
        model.update().unwrap();
    }
    // Run start, Feb..=Dec 2001, and Jan 1 2002.
    assert_eq!(counters.demand.load(Ordering::Relaxed), 13);
}

#[test]
fn reservoir_streamflow_tracks_the_schedule_period() {
    let (mut model, _) = wm_model("2001-01-30", "2001-02-05");
    // Step at Jan 30: schedule month 1.
    model.update().unwrap();
    assert_eq!(
        model.state().reservoir_streamflow,
        Array1::from_elem(4, 10.0)
    );
    model.update().unwrap(); // Jan 31, still month 1
    assert_eq!(
        model.state().reservoir_streamflow,
        Array1::from_elem(4, 10.0)
    );
    model.update().unwrap(); // Feb 1: schedule month 2
    assert_eq!(
        model.state().reservoir_streamflow,
        Array1::from_elem(4, 20.0)
    );
}

#[test]
fn schedule_gap_aborts_the_step() {
    let mut schedule = StreamflowSchedule::new(TimeResolution::Month);
    schedule.insert(1, Array1::from_elem(4, 1.0)); // February missing

    let mut model = ModelBuilder::new()
        .with_config(wm_config("2001-01-31", "2001-02-02", 86400))
        .with_grid(grid4())
        .with_runoff_loader(CountingRunoff {
            calls: Arc::new(AtomicUsize::new(0)),
            rate: 0.0,
        })
        .with_demand_loader(CountingDemand {
            calls: Arc::new(AtomicUsize::new(0)),
            rate: 0.0,
        })
        .with_reservoir_operator(CountingReservoirs {
            calls: Arc::new(AtomicUsize::new(0)),
        })
        .with_streamflow_schedule(schedule)
        .build()
        .unwrap();

    model.update().unwrap(); // Jan 31 is covered
    let err = model.update().unwrap_err(); // Feb 1 is not
    assert!(matches!(err, ModelError::ScheduleGap(2)));
}

#[test]
fn forcing_accumulators_are_zeroed_after_every_step() {
    let (mut model, _) = wm_model("2001-06-01", "2001-06-30");
    for step in 1..=3 {
        model.update().unwrap();
        // The loader adds 2.0/step; routing drains it into the channel.
        // Stale forcing would inflate the channel faster than 2.0/step.
        assert_eq!(
            model.state().hillslope_surface_runoff,
            Array1::<f64>::zeros(4),
            "forcing must be cleared at the end of step {step}"
        );
        assert_eq!(
            model.state().channel_outflow,
            Array1::from_elem(4, 2.0 * step as f64)
        );
    }
}

#[test]
fn supply_and_unmet_demand_are_zeroed_each_step() {
    let (mut model, _) = wm_model("2001-06-01", "2001-06-30");
    model.update().unwrap();
    let status = model.set_value(
        "grid_cell_water__supply_volume_flow_rate",
        &[5.0, 5.0, 5.0, 5.0],
    );
    assert!(status.is_ok());
    model.update().unwrap();
    assert_eq!(model.state().grid_cell_supply, Array1::<f64>::zeros(4));
}
