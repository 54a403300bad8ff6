//! Interpreter for RUBE, a two-dimensional language where crates fall,
//! stack and get pushed around a grid one generation at a time.
//!
//! The engine can be driven directly from an in-memory grid:
//!
//! ```
//! use rube::engine::{step, Grid, MemorySink};
//!
//! let grid = Grid::from_rows(8, 8, &["1", "0", "O", "b", "="]);
//! let mut out = MemorySink::new();
//! let next = step(&grid, &mut out);
//! assert_eq!(out.text(), "16 ");
//! assert_eq!(next.row(0), b" ");
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;


pub use error::{Result, RubeError};
