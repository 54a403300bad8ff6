/// Display configuration constants.
/// 
/// Parameters of the live terminal view. The view is clipped to this region
/// even when the program's bounding box is larger.
pub const SCREEN_WIDTH: usize = 79; // Last column drawn (inclusive).

/// Last row drawn (inclusive).
pub const SCREEN_HEIGHT: usize = 22;

/// Terminal row (1-based) where program output is drawn while the live view is on.
pub const OUTPUT_ROW: u16 = 25;
