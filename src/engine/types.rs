use serde::{Serialize, Deserialize};

/// One cell of the arena, stored as the raw byte loaded from the program text.
pub type Symbol = u8;

/// The empty cell.
pub const BLANK: Symbol = b' ';

/// A cell coordinate, `x` to the right and `y` downward from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` if it would leave
    /// the first quadrant. Upper bounds are checked by the grid.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// Inclusive extent of the loaded program, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x <= self.max_x && pos.y <= self.max_y
    }

    /// Every position of the box in evaluation order: column by column,
    /// top to bottom inside each column.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..=self.max_x).flat_map(move |x| (0..=self.max_y).map(move |y| Position { x, y }))
    }

    pub fn width(&self) -> usize {
        self.max_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y + 1
    }
}
