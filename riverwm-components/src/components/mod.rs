//! Default collaborator implementations.
//!
//! These are deliberately simple, in-memory collaborators: monthly lookup
//! tables for runoff and demand, a demand-proportional reservoir release
//! rule, a mass-conserving pass-through router and an accumulating output
//! buffer. Production couplings replace them with NetCDF-backed loaders and
//! a real transport solver behind the same trait seams.

mod demand;
mod output;
mod reservoirs;
mod routing;
mod runoff;

pub use demand::TableDemand;
pub use output::{MemoryOutput, OutputRecord};
pub use reservoirs::ScheduleReleases;
pub use routing::PassthroughRouting;
pub use runoff::{MonthlyRunoff, TableRunoff};
