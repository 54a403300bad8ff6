//! Error types for loading and running programs.
//!
//! The transition engine itself never fails; these cover the file system and
//! terminal around it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RubeError {
    /// The program source could not be read
    #[error("couldn't open '{}' for input: {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output sink or output file failed
    #[error("output failed: {0}")]
    Output(#[source] io::Error),

    /// Drawing the live view failed
    #[error("render failed: {0}")]
    Render(#[from] io::Error),

    /// The final snapshot could not be serialized
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, RubeError>;
