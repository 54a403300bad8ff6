//! Driver loop.
//!
//! Everything around the engine: choosing where program output goes, drawing
//! the live view, pacing generations and stopping on request.

pub mod run_config;
pub mod pacing;
pub mod driver_loop;

pub use run_config::RunConfig;
pub use pacing::{Pacing, Signal};
pub use driver_loop::{run, Driver};
