//! Null collaborators used as builder defaults.

use chrono::NaiveDateTime;

use crate::component::{OutputHandler, RoutingComponent};
use crate::config::Config;
use crate::errors::ModelResult;
use crate::grid::GridProvider;
use crate::state::ModelState;

/// A routing component that does nothing.
///
/// Lets the orchestrator be exercised without a transport solver attached.
#[derive(Debug, Default)]
pub(crate) struct NullRouting {}

impl RoutingComponent for NullRouting {
    fn solve(
        &mut self,
        _state: &mut ModelState,
        _grid: &dyn GridProvider,
        _config: &Config,
        _now: NaiveDateTime,
    ) -> ModelResult<()> {
        Ok(())
    }
}

/// An output handler that discards everything.
#[derive(Debug, Default)]
pub(crate) struct NullOutput {}

impl OutputHandler for NullOutput {
    fn initialize(&mut self, _config: &Config, _cell_count: usize) -> ModelResult<()> {
        Ok(())
    }

    fn update(&mut self, _state: &ModelState, _now: NaiveDateTime) -> ModelResult<()> {
        Ok(())
    }

    fn finalize(&mut self) -> ModelResult<()> {
        Ok(())
    }
}
