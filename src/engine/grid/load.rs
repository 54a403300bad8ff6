//! Program loading.
//!
//! A program is its own initial grid: one byte per cell, a newline starts the
//! next row, rows that reach the arena width wrap, and anything past the last
//! arena row is silently dropped.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::engine::grid::Grid;
use crate::engine::types::{BoundingBox, Position};
use crate::error::{Result, RubeError};

impl Grid {
    /// Read a program file into a default-sized arena.
    pub fn load(path: impl AsRef<Path>) -> Result<Grid> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|source| RubeError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Grid::parse(&source);
        info!(
            "[Loader] Loaded '{}' ({} bytes), bounding box {}x{}",
            path.display(),
            source.len(),
            grid.bbox().width(),
            grid.bbox().height()
        );
        Ok(grid)
    }

    /// Load program text into a default-sized arena.
    pub fn parse(source: &[u8]) -> Grid {
        let arena = Grid::arena();
        Grid::parse_sized(arena.width(), arena.height(), source)
    }

    /// Load program text into an arena of the given size.
    ///
    /// The bounding box is the longest row seen and the row the cursor ended
    /// on, both inclusive and clamped to the arena.
    pub fn parse_sized(width: usize, height: usize, source: &[u8]) -> Grid {
        let mut grid = Grid::new(width, height);
        let (width, height) = (grid.width(), grid.height());
        let (mut x, mut y, mut max_x) = (0usize, 0usize, 0usize);

        for (consumed, &byte) in source.iter().enumerate() {
            if y >= height {
                warn!(
                    "[Loader] Program taller than the arena, {} trailing bytes ignored",
                    source.len() - consumed
                );
                break;
            }
            if byte == b'\n' {
                x = 0;
                y += 1;
                continue;
            }
            grid.set(Position::new(x, y), byte);
            x += 1;
            max_x = max_x.max(x);
            if x >= width {
                x = 0;
                y += 1;
            }
        }

        grid.set_bbox(BoundingBox { max_x, max_y: y });
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::BLANK;

    #[test]
    fn newline_starts_a_new_row() {
        let grid = Grid::parse(b"ab\ncd");
        assert_eq!(grid.get(Position::new(0, 0)), b'a');
        assert_eq!(grid.get(Position::new(1, 1)), b'd');
        assert_eq!(grid.get(Position::new(2, 0)), BLANK);
        assert_eq!(grid.bbox(), BoundingBox { max_x: 2, max_y: 1 });
    }

    #[test]
    fn long_rows_wrap() {
        let grid = Grid::parse_sized(3, 4, b"12345");
        assert_eq!(grid.get(Position::new(2, 0)), b'3');
        assert_eq!(grid.get(Position::new(0, 1)), b'4');
        assert_eq!(grid.get(Position::new(1, 1)), b'5');
        assert_eq!(grid.bbox(), BoundingBox { max_x: 2, max_y: 1 });
    }

    #[test]
    fn tall_programs_are_truncated() {
        let grid = Grid::parse_sized(4, 2, b"a\nb\nc\nd\n");
        assert_eq!(grid.get(Position::new(0, 0)), b'a');
        assert_eq!(grid.get(Position::new(0, 1)), b'b');
        assert_eq!(grid.bbox(), BoundingBox { max_x: 1, max_y: 1 });
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = Grid::load("/nonexistent/program.rub").unwrap_err();
        assert!(matches!(err, RubeError::Load { .. }));
        assert!(err.to_string().contains("/nonexistent/program.rub"));
    }
}
