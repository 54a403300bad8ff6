//! Arena storage, program loading and read-only snapshots.

pub mod grid;
pub mod load;
pub mod snapshot;

pub use grid::*;
pub use snapshot::*;
