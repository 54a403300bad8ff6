/// Arena configuration constants.
/// 
/// The arena is the fixed coordinate space a program is loaded into.
/// Loaded rows wider than the arena wrap, taller programs are truncated.
pub const ARENA_WIDTH: usize = 80; // Columns per arena row.

/// Number of rows in the arena.
pub const ARENA_HEIGHT: usize = 50;
