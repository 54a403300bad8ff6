use log::warn;

use crate::config::arena::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::engine::types::{BoundingBox, Position, Symbol, BLANK};

/// One buffer of the arena plus the bounding box of the loaded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Symbol>,
    bbox: BoundingBox,
}

impl Grid {
    /// Create a blank arena of the given size. The bounding box covers the
    /// single cell at the origin until a program is loaded.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Grid {
            width,
            height,
            cells: vec![BLANK; width * height],
            bbox: BoundingBox { max_x: 0, max_y: 0 },
        }
    }

    /// Create a blank arena with the default dimensions.
    pub fn arena() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }

    /// Build a grid from literal rows, one row per string. Mostly useful in
    /// tests. Rows are cut at the arena width instead of wrapping, and the
    /// bounding box spans the longest row and every given row.
    pub fn from_rows(width: usize, height: usize, rows: &[&str]) -> Self {
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate().take(grid.height) {
            for (x, &byte) in row.as_bytes().iter().enumerate().take(grid.width) {
                grid.set(Position::new(x, y), byte);
            }
        }
        let longest = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        grid.set_bbox(BoundingBox {
            max_x: longest.saturating_sub(1),
            max_y: rows.len().saturating_sub(1),
        });
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub(crate) fn set_bbox(&mut self, bbox: BoundingBox) {
        self.bbox = BoundingBox {
            max_x: bbox.max_x.min(self.width - 1),
            max_y: bbox.max_y.min(self.height - 1),
        };
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }

    /// Symbol at `pos`, blank outside the arena.
    pub fn get(&self, pos: Position) -> Symbol {
        self.index(pos).map_or(BLANK, |i| self.cells[i])
    }

    /// Symbol at `pos + (dx, dy)`, blank outside the arena.
    pub fn neighbor(&self, pos: Position, dx: isize, dy: isize) -> Symbol {
        pos.offset(dx, dy).map_or(BLANK, |p| self.get(p))
    }

    /// Write a symbol. Returns false (and writes nothing) outside the arena.
    pub fn set(&mut self, pos: Position, symbol: Symbol) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = symbol;
                true
            }
            None => false,
        }
    }

    /// Write a symbol at `pos + (dx, dy)`; writes off the arena are dropped.
    pub fn set_offset(&mut self, pos: Position, dx: isize, dy: isize, symbol: Symbol) {
        let written = pos.offset(dx, dy).is_some_and(|p| self.set(p, symbol));
        if !written {
            warn!(
                "[Engine] Dropped write of '{}' outside the arena at ({}, {}) + ({}, {})",
                symbol.escape_ascii(), pos.x, pos.y, dx, dy
            );
        }
    }

    /// The bounding-box slice of row `y`; empty past the bottom of the box.
    pub fn row(&self, y: usize) -> &[Symbol] {
        if y > self.bbox.max_y {
            return &[];
        }
        let start = y * self.width;
        &self.cells[start..=start + self.bbox.max_x]
    }

    /// Rows of the bounding box, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> {
        (0..=self.bbox.max_y).map(|y| self.row(y))
    }

    /// Make this buffer a copy of `other`, taking its dimensions if they differ.
    /// The allocation is reused when it is large enough.
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clone_from(&other.cells);
        self.bbox = other.bbox;
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::arena()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_outside_arena_is_blank() {
        let grid = Grid::from_rows(3, 2, &["123", "456"]);
        let corner = Position::new(0, 0);
        assert_eq!(grid.neighbor(corner, -1, 0), BLANK);
        assert_eq!(grid.neighbor(corner, 0, -2), BLANK);
        let far = Position::new(2, 1);
        assert_eq!(grid.neighbor(far, 1, 0), BLANK);
        assert_eq!(grid.neighbor(far, 2, 2), BLANK);
        assert_eq!(grid.neighbor(far, -1, -1), b'2');
    }

    #[test]
    fn writes_outside_arena_are_dropped() {
        let mut grid = Grid::new(2, 2);
        let before = grid.clone();
        grid.set_offset(Position::new(0, 0), -1, 0, b'7');
        grid.set_offset(Position::new(1, 1), 1, 0, b'7');
        assert_eq!(grid, before);
        assert!(!grid.set(Position::new(2, 0), b'7'));
    }

    #[test]
    fn copy_from_takes_the_other_dimensions() {
        let source = Grid::from_rows(5, 3, &["12", "=="]);
        let mut buffer = Grid::new(2, 7);
        buffer.copy_from(&source);
        assert_eq!(buffer, source);
    }

    #[test]
    fn rows_cover_only_the_bounding_box() {
        let grid = Grid::from_rows(10, 10, &["ab", "c"]);
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&b"ab"[..], &b"c "[..]]);
    }
}
