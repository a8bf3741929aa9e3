//! The name-indexed variable exchange protocol and grid introspection.
//!
//! A BMI-style surface: callers read and write state arrays through stable
//! standard names, independent of the model's internal representation.
//! Lookups go through the fixed registry in [`crate::variable`]; an unknown
//! name is a soft failure reported as a status code, except for
//! [`get_value_ptr`](Model::get_value_ptr), which hands out a reference and
//! therefore has nothing to return for an unknown name.
//!
//! All grid introspection calls copy into caller-supplied buffers; no
//! internal buffer persists across calls.

use ndarray::Array1;

use crate::errors::{ModelError, ModelResult};
use crate::variable::{self, VariableDescriptor};

use super::runtime::Model;

/// Status code returned by the soft-failure exchange entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExchangeStatus {
    Ok = 0,
    UnknownVariable = 1,
}

impl ExchangeStatus {
    /// Numeric code as exposed through the coupling protocol.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ExchangeStatus::Ok)
    }
}

impl Model {
    /// Name identifying this component to a coupling framework.
    pub fn component_name(&self) -> String {
        match self.version() {
            Some(v) => format!("riverwm ({})", v.revision),
            None => "riverwm".to_string(),
        }
    }

    pub fn input_item_count(&self) -> usize {
        variable::input_item_count()
    }

    pub fn output_item_count(&self) -> usize {
        variable::output_item_count()
    }

    pub fn input_var_names(&self) -> Vec<&'static str> {
        variable::input_var_names()
    }

    pub fn output_var_names(&self) -> Vec<&'static str> {
        variable::output_var_names()
    }

    /// Grid id of a variable; the model has a single grid, id 0.
    pub fn var_grid(&self, _name: &str) -> i32 {
        0
    }

    pub fn var_type(&self, name: &str) -> Option<&'static str> {
        variable::lookup(name).map(|var| var.element_type.type_name())
    }

    pub fn var_units(&self, name: &str) -> Option<&'static str> {
        variable::lookup(name).map(|var| var.unit)
    }

    pub fn var_itemsize(&self, name: &str) -> Option<usize> {
        variable::lookup(name).map(VariableDescriptor::item_size)
    }

    pub fn var_nbytes(&self, name: &str) -> Option<usize> {
        self.var_itemsize(name).map(|size| size * self.grid_size())
    }

    /// All per-cell arrays live on grid nodes.
    pub fn var_location(&self, _name: &str) -> &'static str {
        "node"
    }

    /// Current time in seconds since the Unix epoch.
    pub fn current_time(&self) -> f64 {
        self.clock.now_seconds()
    }

    pub fn start_time(&self) -> f64 {
        self.clock.start_seconds()
    }

    pub fn end_time(&self) -> f64 {
        self.clock.end_seconds()
    }

    pub fn time_units(&self) -> &'static str {
        "s"
    }

    pub fn time_step(&self) -> f64 {
        self.clock.step_seconds()
    }

    /// Copy the full array for `name` into `dest`.
    ///
    /// Returns [`ExchangeStatus::UnknownVariable`] without touching `dest`
    /// when the name is unregistered. `dest` must hold at least
    /// `grid_size()` elements; extra elements are left unchanged.
    pub fn get_value(&self, name: &str, dest: &mut [f64]) -> ExchangeStatus {
        let Some(var) = variable::lookup(name) else {
            return ExchangeStatus::UnknownVariable;
        };
        for (d, s) in dest.iter_mut().zip(var.read(&self.state).iter()) {
            *d = *s;
        }
        ExchangeStatus::Ok
    }

    /// Borrow the live backing array for `name` directly, no copy.
    ///
    /// Unlike [`get_value`](Model::get_value) this fails hard on an unknown
    /// name: this entry point returns a handle, and no handle exists for an
    /// unregistered variable.
    pub fn get_value_ptr(&self, name: &str) -> ModelResult<&Array1<f64>> {
        variable::lookup(name)
            .map(|var| var.read(&self.state))
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    /// Copy the values at `indices` into `dest`, one per index.
    ///
    /// Out-of-range indices are the caller's responsibility and panic.
    pub fn get_value_at_indices(
        &self,
        name: &str,
        dest: &mut [f64],
        indices: &[usize],
    ) -> ExchangeStatus {
        let Some(var) = variable::lookup(name) else {
            return ExchangeStatus::UnknownVariable;
        };
        let source = var.read(&self.state);
        for (d, &i) in dest.iter_mut().zip(indices.iter()) {
            *d = source[i];
        }
        ExchangeStatus::Ok
    }

    /// Overwrite the full array for `name` from `src`.
    pub fn set_value(&mut self, name: &str, src: &[f64]) -> ExchangeStatus {
        let Some(var) = variable::lookup(name) else {
            return ExchangeStatus::UnknownVariable;
        };
        for (d, s) in var.write(&mut self.state).iter_mut().zip(src.iter()) {
            *d = *s;
        }
        ExchangeStatus::Ok
    }

    /// Overwrite the values at `indices` from `src`, one per index.
    pub fn set_value_at_indices(
        &mut self,
        name: &str,
        indices: &[usize],
        src: &[f64],
    ) -> ExchangeStatus {
        let Some(var) = variable::lookup(name) else {
            return ExchangeStatus::UnknownVariable;
        };
        let dest = var.write(&mut self.state);
        for (&i, &s) in indices.iter().zip(src.iter()) {
            dest[i] = s;
        }
        ExchangeStatus::Ok
    }

    // Grid introspection: read-only projections of the grid provider's
    // uniform rectilinear geometry.

    pub fn grid_type(&self) -> &'static str {
        "uniform_rectilinear"
    }

    /// Two dimensions: latitude, longitude.
    pub fn grid_rank(&self) -> usize {
        2
    }

    pub fn grid_size(&self) -> usize {
        self.grid.cell_count()
    }

    pub fn grid_shape(&self, shape: &mut [usize; 2]) {
        *shape = self.grid.shape();
    }

    pub fn grid_spacing(&self, spacing: &mut [f64; 2]) {
        *spacing = self.grid.spacing();
    }

    pub fn grid_origin(&self, origin: &mut [f64; 2]) {
        *origin = self.grid.origin();
    }

    /// Copy the unique latitude values into `x`.
    pub fn grid_x(&self, x: &mut [f64]) {
        for (d, s) in x.iter_mut().zip(self.grid.latitudes().iter()) {
            *d = *s;
        }
    }

    /// Copy the unique longitude values into `y`.
    pub fn grid_y(&self, y: &mut [f64]) {
        for (d, s) in y.iter_mut().zip(self.grid.longitudes().iter()) {
            *d = *s;
        }
    }

    // The grid is cell-based, not a mesh: vertical levels and node/edge/face
    // topology are missing capabilities, distinct from runtime errors.

    pub fn grid_z(&self, _z: &mut [f64]) -> ModelResult<()> {
        Err(ModelError::Unsupported("grid_z"))
    }

    pub fn grid_node_count(&self) -> ModelResult<usize> {
        Err(ModelError::Unsupported("grid_node_count"))
    }

    pub fn grid_edge_count(&self) -> ModelResult<usize> {
        Err(ModelError::Unsupported("grid_edge_count"))
    }

    pub fn grid_face_count(&self) -> ModelResult<usize> {
        Err(ModelError::Unsupported("grid_face_count"))
    }

    pub fn grid_edge_nodes(&self, _edge_nodes: &mut [usize]) -> ModelResult<()> {
        Err(ModelError::Unsupported("grid_edge_nodes"))
    }

    pub fn grid_face_edges(&self, _face_edges: &mut [usize]) -> ModelResult<()> {
        Err(ModelError::Unsupported("grid_face_edges"))
    }

    pub fn grid_face_nodes(&self, _face_nodes: &mut [usize]) -> ModelResult<()> {
        Err(ModelError::Unsupported("grid_face_nodes"))
    }

    pub fn grid_nodes_per_face(&self, _nodes_per_face: &mut [usize]) -> ModelResult<()> {
        Err(ModelError::Unsupported("grid_nodes_per_face"))
    }
}
