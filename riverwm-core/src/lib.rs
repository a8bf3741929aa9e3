pub mod clock;
pub mod component;
pub mod config;
mod example_components;
pub mod grid;
pub mod model;
pub mod scheduler;
pub mod state;
pub mod variable;

pub mod errors;
