//! The variable exchange protocol: soft failure codes, pointer access,
//! indexed subsets, metadata introspection.

use ndarray::Array1;

use super::{grid4, plain_config};
use crate::errors::ModelError;
use crate::model::{ExchangeStatus, Model, ModelBuilder};

const OUTFLOW: &str = "channel_water__outgoing_volume_flow_rate";
const SURFACE: &str = "land_surface_water__runoff_volume_flux";

fn model() -> Model {
    ModelBuilder::new()
        .with_config(plain_config("2000-01-01", "2000-12-31", 86400))
        .with_grid(grid4())
        .build()
        .unwrap()
}

#[test]
fn set_then_get_round_trips_bit_for_bit() {
    let mut model = model();
    let source = [0.1 + 0.2, std::f64::consts::PI, -0.0, 1e-308];
    assert_eq!(model.set_value(SURFACE, &source), ExchangeStatus::Ok);

    let mut dest = [0.0; 4];
    assert_eq!(model.get_value(SURFACE, &mut dest), ExchangeStatus::Ok);
    for (got, expected) in dest.iter().zip(source.iter()) {
        assert_eq!(got.to_bits(), expected.to_bits());
    }
}

#[test]
fn unknown_name_returns_code_one_and_leaves_dest_untouched() {
    let mut model = model();
    let mut dest = [-99.0; 4];
    let status = model.get_value("no_such_variable", &mut dest);
    assert_eq!(status, ExchangeStatus::UnknownVariable);
    assert_eq!(status.code(), 1);
    assert!(!status.is_ok());
    assert_eq!(dest, [-99.0; 4]);

    assert_eq!(
        model.set_value("no_such_variable", &[1.0; 4]),
        ExchangeStatus::UnknownVariable
    );
    assert_eq!(
        model.get_value_at_indices("no_such_variable", &mut dest, &[0]),
        ExchangeStatus::UnknownVariable
    );
    assert_eq!(
        model.set_value_at_indices("no_such_variable", &[0], &[1.0]),
        ExchangeStatus::UnknownVariable
    );
    assert_eq!(dest, [-99.0; 4]);
}

#[test]
fn get_value_copies_the_live_array() {
    let mut model = model();
    model.set_value(SURFACE, &[1.0, 2.0, 3.0, 4.0]);
    let mut dest = [0.0; 4];
    assert_eq!(model.get_value(SURFACE, &mut dest).code(), 0);
    assert_eq!(dest, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        model.state().hillslope_surface_runoff,
        Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0])
    );
}

#[test]
fn get_value_ptr_is_a_hard_lookup() {
    let mut model = model();
    model.set_value(SURFACE, &[7.0, 8.0, 9.0, 10.0]);
    let live = model.get_value_ptr(SURFACE).unwrap();
    assert_eq!(live[3], 10.0);

    let err = model.get_value_ptr("no_such_variable").unwrap_err();
    assert!(matches!(err, ModelError::UnknownVariable(name) if name == "no_such_variable"));
}

#[test]
fn indexed_subset_access() {
    let mut model = model();
    assert_eq!(
        model.set_value_at_indices(SURFACE, &[1, 3], &[5.0, 6.0]),
        ExchangeStatus::Ok
    );
    assert_eq!(
        model.state().hillslope_surface_runoff,
        Array1::from_vec(vec![0.0, 5.0, 0.0, 6.0])
    );

    let mut dest = [0.0; 2];
    assert_eq!(
        model.get_value_at_indices(SURFACE, &mut dest, &[3, 1]),
        ExchangeStatus::Ok
    );
    assert_eq!(dest, [6.0, 5.0]);
}

#[test]
fn variable_metadata_follows_the_registry() {
    let model = model();
    assert_eq!(model.var_units(OUTFLOW), Some("m3 s-1"));
    assert_eq!(model.var_type(OUTFLOW), Some("float64"));
    assert_eq!(model.var_itemsize(OUTFLOW), Some(8));
    assert_eq!(model.var_nbytes(OUTFLOW), Some(8 * 4));
    assert_eq!(model.var_grid(OUTFLOW), 0);
    assert_eq!(model.var_location(OUTFLOW), "node");
    assert_eq!(model.var_units("no_such_variable"), None);

    assert_eq!(model.input_item_count(), model.input_var_names().len());
    assert_eq!(model.output_item_count(), model.output_var_names().len());
    assert!(model.output_var_names().contains(&OUTFLOW));
    assert!(model.input_var_names().contains(&SURFACE));
}

#[test]
fn time_metadata_is_seconds_based() {
    let model = model();
    assert_eq!(model.time_units(), "s");
    assert_eq!(model.time_step(), 86400.0);
    assert_eq!(model.current_time(), model.start_time());
    assert!(model.end_time() > model.start_time());
    // 2000 is a leap year: 366 days minus the final second.
    assert_eq!(model.end_time() - model.start_time(), 366.0 * 86400.0 - 1.0);
}

#[test]
fn component_name_is_stable() {
    let model = model();
    assert!(model.component_name().starts_with("riverwm"));
}
