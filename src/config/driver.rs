/// Driver loop configuration defaults.
/// 
/// Used when the command line does not override them.
pub const DEFAULT_DELAY_MS: u64 = 0; // Pause between generations, in milliseconds.

/// Render every Nth generation.
pub const DEFAULT_FRAME_SKIP: u64 = 1;
