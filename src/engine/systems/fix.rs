//! Fix pass.
//!
//! Runs after the rule pass and patches `next` for effects that span more
//! than one cell: consumed port operands, gates shoving whole crate runs,
//! pivots giving way and destroyers. Conditions are read from the current
//! grid only; writes go to `next`, possibly at an offset from the cell being
//! scanned, so the column-major scan order decides which of two conflicting
//! writes lands last.

use log::trace;

use crate::engine::cell::{Category, classify, is_blank, is_crate};
use crate::engine::grid::Grid;
use crate::engine::systems::rules::{port_loaded, Cursor};
use crate::engine::systems::shift::{run_offsets, run_reaches};
use crate::engine::types::{Position, Symbol, BLANK};

const NEIGHBORS_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn touches(c: &Cursor, symbol: Symbol) -> bool {
    NEIGHBORS_4.iter().any(|&(dx, dy)| c.at(dx, dy) == symbol)
}

/// Shift the supported crate run starting at the cell one step in `dir`,
/// provided there is room at its far end. The gate on the other side (at
/// `-dir`) follows into the cell the run vacated.
fn shove_run(current: &Grid, next: &mut Grid, pos: Position, dir: isize, gate: Symbol) {
    if !run_reaches(current, pos, 0, dir, is_blank) {
        return;
    }
    trace!("[Engine] Gate '{}' at ({}, {}) shoves a crate run", gate as char, pos.x, pos.y);
    for bx in run_offsets(current, pos, 0, dir) {
        next.set_offset(pos, bx + dir, 0, current.neighbor(pos, bx, 0));
    }
    next.set(pos, gate);
    next.set_offset(pos, -dir, 0, BLANK);
}

fn fix_cell(current: &Grid, next: &mut Grid, pos: Position) {
    let c = Cursor::new(current, pos);
    let cur = c.cur();

    match classify(cur) {
        Category::Pivot if c.at(-1, 0) == b')' || c.at(1, 0) == b'(' => {
            next.set(pos, BLANK);
        }
        Category::Port if port_loaded(&c) => {
            next.set_offset(pos, 0, -1, BLANK);
            next.set_offset(pos, 0, -2, BLANK);
        }
        _ => {}
    }

    if is_crate(cur) {
        if c.at(1, 0) == b')' {
            shove_run(current, next, pos, -1, b')');
        }
        if c.at(-1, 0) == b'(' {
            shove_run(current, next, pos, 1, b'(');
        }
        if touches(&c, b'C') {
            next.set(pos, BLANK);
        }
    }

    if touches(&c, b'F') {
        next.set(pos, BLANK);
    }
}

/// Apply multi-cell corrections to `next`, scanning the bounding box of `current`.
pub fn fix_pass(current: &Grid, next: &mut Grid) {
    for pos in current.bbox().positions() {
        fix_cell(current, next, pos);
    }
}
