//! Variable registry for the exchange protocol.
//!
//! A fixed catalogue of named exchange items, built once at compile time.
//! Each entry carries a standard name, physical unit, element type and a pair
//! of accessor function pointers resolving to the backing array inside
//! [`ModelState`]. Dispatch is an explicit table lookup; there is no runtime
//! reflection.
//!
//! Two disjoint sub-tables exist: [`INPUTS`] (settable from outside) and
//! [`OUTPUTS`] (gettable from outside). A name may appear in both. The
//! exchange protocol looks names up in the combined table via [`lookup`].

use ndarray::Array1;

use crate::state::ModelState;

/// Numeric kind of a variable's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    F64,
}

impl ElementType {
    /// Bytes per element.
    pub fn item_size(&self) -> usize {
        match self {
            ElementType::F64 => std::mem::size_of::<f64>(),
        }
    }

    /// Type name as exposed through the coupling protocol.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementType::F64 => "float64",
        }
    }
}

/// Which owning container a variable resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableClass {
    State,
    Grid,
}

/// Accessor resolving a descriptor to its live backing array.
pub type ReadAccessor = fn(&ModelState) -> &Array1<f64>;
/// Accessor resolving a descriptor to its mutable backing array.
pub type WriteAccessor = fn(&mut ModelState) -> &mut Array1<f64>;

/// One named exchange item. Immutable after registry construction.
#[derive(Clone, Copy)]
pub struct VariableDescriptor {
    /// Unique string key shared with the coupling framework
    pub standard_name: &'static str,
    /// Declared unit callers must respect
    pub unit: &'static str,
    pub element_type: ElementType,
    pub variable_class: VariableClass,
    read: ReadAccessor,
    write: WriteAccessor,
}

impl VariableDescriptor {
    /// Bytes per element.
    pub fn item_size(&self) -> usize {
        self.element_type.item_size()
    }

    /// Borrow the live backing array.
    pub fn read<'a>(&self, state: &'a ModelState) -> &'a Array1<f64> {
        (self.read)(state)
    }

    /// Mutably borrow the live backing array.
    pub fn write<'a>(&self, state: &'a mut ModelState) -> &'a mut Array1<f64> {
        (self.write)(state)
    }
}

impl std::fmt::Debug for VariableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableDescriptor")
            .field("standard_name", &self.standard_name)
            .field("unit", &self.unit)
            .field("element_type", &self.element_type)
            .field("variable_class", &self.variable_class)
            .finish()
    }
}

macro_rules! state_variable {
    ($name:expr, $unit:expr, $field:ident) => {
        VariableDescriptor {
            standard_name: $name,
            unit: $unit,
            element_type: ElementType::F64,
            variable_class: VariableClass::State,
            read: |state: &ModelState| &state.$field,
            write: |state: &mut ModelState| &mut state.$field,
        }
    };
}

/// Exchange items settable from outside the model.
pub static INPUTS: &[VariableDescriptor] = &[
    state_variable!(
        "land_surface_water__runoff_volume_flux",
        "mm s-1",
        hillslope_surface_runoff
    ),
    state_variable!(
        "land_subsurface_water__runoff_volume_flux",
        "mm s-1",
        hillslope_subsurface_runoff
    ),
    state_variable!(
        "land_wetland_water__runoff_volume_flux",
        "mm s-1",
        hillslope_wetland_runoff
    ),
    state_variable!(
        "grid_cell_water__demand_volume_flux",
        "m3 s-1",
        grid_cell_demand_rate
    ),
];

/// Exchange items gettable from outside the model.
pub static OUTPUTS: &[VariableDescriptor] = &[
    state_variable!(
        "channel_water__outgoing_volume_flow_rate",
        "m3 s-1",
        channel_outflow
    ),
    state_variable!(
        "grid_cell_water__supply_volume_flow_rate",
        "m3 s-1",
        grid_cell_supply
    ),
    state_variable!(
        "grid_cell_water__unmet_demand_volume",
        "m3",
        grid_cell_unmet_demand
    ),
    state_variable!(
        "reservoir_water__inflow_volume_flow_rate",
        "m3 s-1",
        reservoir_streamflow
    ),
    state_variable!(
        "grid_cell_water__demand_volume_flux",
        "m3 s-1",
        grid_cell_demand_rate
    ),
];

/// Look a standard name up in the combined input + output table.
pub fn lookup(name: &str) -> Option<&'static VariableDescriptor> {
    INPUTS
        .iter()
        .chain(OUTPUTS.iter())
        .find(|var| var.standard_name == name)
}

pub fn input_item_count() -> usize {
    INPUTS.len()
}

pub fn output_item_count() -> usize {
    OUTPUTS.len()
}

pub fn input_var_names() -> Vec<&'static str> {
    INPUTS.iter().map(|var| var.standard_name).collect()
}

pub fn output_var_names() -> Vec<&'static str> {
    OUTPUTS.iter().map(|var| var.standard_name).collect()
}
