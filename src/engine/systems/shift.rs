//! Crate-run walking.
//!
//! Gates push and are reversed by horizontal runs of crates. A run is walked
//! strictly outward from where it starts, one cell at a time, and ends at the
//! first cell that is not a crate resting on support.

use crate::engine::cell::{is_crate, is_support};
use crate::engine::grid::Grid;
use crate::engine::types::{Position, Symbol};

/// Horizontal offsets of the supported crate run starting at `pos + (start, 0)`
/// and heading in direction `step` (-1 or 1). Empty if the start cell does not
/// qualify. Always finite, since reads off the arena are blank.
pub fn run_offsets(grid: &Grid, pos: Position, start: isize, step: isize) -> impl Iterator<Item = isize> + '_ {
    std::iter::successors(Some(start), move |bx| Some(bx + step)).take_while(move |&bx| {
        is_crate(grid.neighbor(pos, bx, 0)) && is_support(grid.neighbor(pos, bx, 1))
    })
}

/// Whether the cell just past any member of the run satisfies `pred`.
pub fn run_reaches(
    grid: &Grid,
    pos: Position,
    start: isize,
    step: isize,
    pred: impl Fn(Symbol) -> bool,
) -> bool {
    run_offsets(grid, pos, start, step).any(|bx| pred(grid.neighbor(pos, bx + step, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_stops_at_first_unsupported_crate() {
        let grid = Grid::from_rows(8, 3, &["(123 ", "=== =="]);
        let pos = Position::new(0, 0);
        let offsets: Vec<isize> = run_offsets(&grid, pos, 1, 1).collect();
        assert_eq!(offsets, vec![1, 2]);
    }

    #[test]
    fn run_from_non_crate_is_empty() {
        let grid = Grid::from_rows(4, 2, &[" = ", "==="]);
        assert_eq!(run_offsets(&grid, Position::new(0, 0), 1, 1).count(), 0);
    }

    #[test]
    fn run_reaches_looks_one_past_each_member() {
        let grid = Grid::from_rows(6, 2, &["12=", "==="]);
        let pos = Position::new(0, 0);
        assert!(run_reaches(&grid, pos, 0, 1, |c| c == b'='));
        assert!(!run_reaches(&grid, pos, 0, 1, |c| c == b')'));
    }

    #[test]
    fn run_walks_left_off_the_arena() {
        let grid = Grid::from_rows(3, 2, &["12)", "==="]);
        let offsets: Vec<isize> = run_offsets(&grid, Position::new(1, 0), 0, -1).collect();
        assert_eq!(offsets, vec![0, -1]);
    }
}
