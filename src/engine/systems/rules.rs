//! Rule pass.
//!
//! Every cell of the bounding box gets a next symbol computed purely from the
//! current grid. Each category has an ordered rule table; all rules in the
//! table are evaluated and the last one that matches decides the cell. Crate
//! cells then go through a second table of checks that can only keep or
//! remove the crate.

use log::trace;

use crate::engine::cell::{
    Category, classify, crate_value, digit_weight, is_blank, is_block, is_crate, is_ramp,
    is_support, value_to_crate,
};
use crate::engine::grid::Grid;
use crate::engine::port::{Emission, OutputSink};
use crate::engine::systems::shift::run_reaches;
use crate::engine::types::{Position, Symbol, BLANK};

/// A cell and read access to its neighbourhood in the current grid.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    pub grid: &'a Grid,
    pub pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(grid: &'a Grid, pos: Position) -> Self {
        Self { grid, pos }
    }

    /// Symbol of the cell itself.
    pub fn cur(&self) -> Symbol {
        self.grid.get(self.pos)
    }

    /// Symbol at `(dx, dy)` from the cell, blank off the arena.
    pub fn at(&self, dx: isize, dy: isize) -> Symbol {
        self.grid.neighbor(self.pos, dx, dy)
    }

    fn is_crate_at(&self, dx: isize, dy: isize) -> bool {
        is_crate(self.at(dx, dy))
    }

    fn crate_beside(&self) -> bool {
        self.is_crate_at(-1, 0) || self.is_crate_at(1, 0)
    }
}

type Rule = fn(&Cursor) -> Option<Symbol>;

/// Evaluate `rules` in order and keep the last result.
fn last_match(rules: &[Rule], cursor: &Cursor) -> Option<Symbol> {
    rules.iter().filter_map(|rule| rule(cursor)).last()
}

// ---------------------------------------------------------------- blank cells

/// Rules for an empty cell, in priority order (later wins).
const BLANK_RULES: &[Rule] = &[
    fall_in,
    gate_falls_in,
    winch_delivers,
    swinch_down_delivers,
    winch_lifts,
    swinch_up_delivers,
    sink_spreads,
    adder_packs,
    subtractor_unpacks,
    comparator_passes,
    shifter_carries,
    teleport_relays,
    conveyor_lifts,
    gate_moves,
    gate_pushes_crates,
];

/// A crate directly above falls in.
fn fall_in(c: &Cursor) -> Option<Symbol> {
    c.is_crate_at(0, -1).then(|| c.at(0, -1))
}

fn gate_falls_in(c: &Cursor) -> Option<Symbol> {
    let above = c.at(0, -1);
    (above == b'(' || above == b')').then_some(above)
}

/// A 'W' diagonally below hauls whatever sits two cells out on the same diagonal.
fn winch_delivers(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(1, 1) == b'W' {
        out = Some(c.at(2, 2));
    }
    if c.at(-1, 1) == b'W' {
        out = Some(c.at(-2, 2));
    }
    out
}

fn swinch_down_delivers(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(1, 1) == b'V' && c.is_crate_at(2, 1) {
        out = Some(c.at(2, 1));
    }
    if c.at(-1, 1) == b'V' && c.is_crate_at(-2, 1) {
        out = Some(c.at(-2, 1));
    }
    out
}

/// An 'M' diagonally above lowers whatever sits two cells out on the same diagonal.
fn winch_lifts(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(1, -1) == b'M' {
        out = Some(c.at(2, -2));
    }
    if c.at(-1, -1) == b'M' {
        out = Some(c.at(-2, -2));
    }
    out
}

fn swinch_up_delivers(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(1, -1) == b'A' && c.is_crate_at(2, -1) {
        out = Some(c.at(2, -1));
    }
    if c.at(-1, -1) == b'A' && c.is_crate_at(-2, -1) {
        out = Some(c.at(-2, -1));
    }
    out
}

/// '~' spreads downward always, and sideways only over support.
fn sink_spreads(c: &Cursor) -> Option<Symbol> {
    let from_above = c.at(0, -1) == b'~';
    let from_left = c.at(-1, 0) == b'~' && is_support(c.at(-1, 1));
    let from_right = c.at(1, 0) == b'~' && is_support(c.at(1, 1));
    (from_above || from_left || from_right).then_some(b'~')
}

/// Value of the two crates at `(dir, 0)` and `(2 * dir, 0)` under an operator
/// at `(dir, -1)`, adjacent one first.
fn operands(c: &Cursor, dir: isize, op: Symbol) -> Option<(u8, u8)> {
    if c.at(dir, -1) != op {
        return None;
    }
    Some((crate_value(c.at(dir, 0))?, crate_value(c.at(2 * dir, 0))?))
}

/// '+' diagonally above: the sum of the two crates under and beyond it.
fn adder_packs(c: &Cursor) -> Option<Symbol> {
    [1, -1]
        .into_iter()
        .filter_map(|dir| operands(c, dir, b'+'))
        .map(|(a, b)| value_to_crate((a + b) % 16))
        .last()
}

/// '-' diagonally above: the far crate minus the near one, wrapped to a nibble.
fn subtractor_unpacks(c: &Cursor) -> Option<Symbol> {
    [1, -1]
        .into_iter()
        .filter_map(|dir| operands(c, dir, b'-'))
        .map(|(a, b)| value_to_crate(b.wrapping_sub(a) & 0x0f))
        .last()
}

/// 'K' up-right passes its top crate if it is less than the cell under the 'K';
/// 'K' up-left passes it if greater or equal.
fn comparator_passes(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(1, -1) == b'K' && c.is_crate_at(1, -2) && digit_weight(c.at(1, -2)) < digit_weight(c.at(1, 0)) {
        out = Some(c.at(1, -2));
    }
    if c.at(-1, -1) == b'K' && c.is_crate_at(-1, -2) && digit_weight(c.at(-1, -2)) >= digit_weight(c.at(-1, 0)) {
        out = Some(c.at(-1, -2));
    }
    out
}

/// A crate riding a '>' moves right, one riding a '<' moves left.
fn shifter_carries(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.is_crate_at(-1, 0) && c.at(-1, 1) == b'>' {
        out = Some(c.at(-1, 0));
    }
    if c.is_crate_at(1, 0) && c.at(1, 1) == b'<' {
        out = Some(c.at(1, 0));
    }
    out
}

/// ':' copies the cell above it through unconditionally; ';' only crates.
fn teleport_relays(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if c.at(0, -1) == b':' {
        out = Some(c.at(0, -2));
    }
    if c.at(0, -1) == b';' && c.is_crate_at(0, -2) {
        out = Some(c.at(0, -2));
    }
    out
}

/// A '.' below lifts the crate under it up through itself.
fn conveyor_lifts(c: &Cursor) -> Option<Symbol> {
    (c.at(0, 1) == b'.' && c.is_crate_at(0, 2)).then(|| c.at(0, 2))
}

/// Gates slide sideways over support and down ramps; two gates meeting head
/// on annihilate.
fn gate_moves(c: &Cursor) -> Option<Symbol> {
    if c.at(-1, 0) == b'(' && c.at(1, 0) == b')' {
        return Some(BLANK);
    }
    let mut out = None;
    if c.at(-1, 0) == b'(' && is_support(c.at(-1, 1)) {
        out = Some(b'(');
    }
    if c.at(1, 0) == b')' && is_support(c.at(1, 1)) {
        out = Some(b')');
    }
    if is_ramp(c.at(0, 1)) {
        if c.at(-1, 1) == b'(' && is_support(c.at(-1, 2)) {
            out = Some(b'(');
        }
        if c.at(1, 1) == b')' && is_support(c.at(1, 2)) {
            out = Some(b')');
        }
    }
    out
}

/// A gate behind a supported crate run pushes the whole run into this cell.
fn gate_pushes_crates(c: &Cursor) -> Option<Symbol> {
    let mut out = None;
    if run_reaches(c.grid, c.pos, -1, -1, |s| s == b'(') {
        out = Some(c.at(-1, 0));
    }
    if run_reaches(c.grid, c.pos, 1, 1, |s| s == b')') {
        out = Some(c.at(1, 0));
    }
    out
}

// ----------------------------------------------------------------- gate cells

/// A moving gate: '(' travels right, ')' travels left.
#[derive(Debug, Clone, Copy)]
struct Gate {
    symbol: Symbol,
    reversed: Symbol,
    facing: isize,
}

const LEFT_GATE: Gate = Gate { symbol: b'(', reversed: b')', facing: 1 };
const RIGHT_GATE: Gate = Gate { symbol: b')', reversed: b'(', facing: -1 };

type GateRule = fn(&Cursor, Gate) -> Option<Symbol>;

const GATE_RULES: &[GateRule] = &[gate_leaves, gate_hits_ramp, gate_bounces, gate_bounces_off_run];

/// The gate moves on (its cell empties) unless something stops it.
fn gate_leaves(c: &Cursor, g: Gate) -> Option<Symbol> {
    let ahead = c.at(g.facing, 0);
    let below = c.at(0, 1);
    (ahead == g.symbol || is_blank(ahead) || is_blank(below) || below == g.symbol).then_some(BLANK)
}

fn gate_hits_ramp(c: &Cursor, _: Gate) -> Option<Symbol> {
    (is_ramp(c.at(0, 1)) || is_ramp(c.at(1, 0)) || is_ramp(c.at(-1, 0))).then_some(BLANK)
}

/// A block, pivot or ',' ahead turns the gate around.
fn gate_bounces(c: &Cursor, g: Gate) -> Option<Symbol> {
    let ahead = c.at(g.facing, 0);
    (is_block(ahead) || ahead == b'*' || c.at(g.facing, -1) == b',').then_some(g.reversed)
}

/// A supported crate run ahead that is jammed against a block turns it around too.
fn gate_bounces_off_run(c: &Cursor, g: Gate) -> Option<Symbol> {
    run_reaches(c.grid, c.pos, g.facing, g.facing, is_block).then_some(g.reversed)
}

fn eval_gate(c: &Cursor, gate: Gate) -> Option<Symbol> {
    GATE_RULES.iter().filter_map(|rule| rule(c, gate)).last()
}

// ------------------------------------------------------- swinches and the port

/// 'A' and 'V' flip whenever a crate is beside them. `flipped` is what the
/// cell becomes in that case.
fn swinch_toggle(c: &Cursor, flipped: Symbol) -> Symbol {
    if c.crate_beside() { flipped } else { c.cur() }
}

/// Value an 'O' cell would emit this generation, if any.
pub fn port_emission(c: &Cursor) -> Option<Emission> {
    let low = crate_value(c.at(0, -1))?;
    let high = crate_value(c.at(0, -2))?;
    let d = low + high * 16;
    match c.at(0, 1) {
        b'b' => Some(Emission::Number(d)),
        b'c' => Some(Emission::Char(d)),
        _ => None,
    }
}

/// Whether an 'O' cell has two crates stacked on it (and so consumes them).
pub fn port_loaded(c: &Cursor) -> bool {
    c.is_crate_at(0, -1) && c.is_crate_at(0, -2)
}

// ---------------------------------------------------------------- crate cells

/// Checks applied to every crate after its category rule, in order.
const CRATE_RULES: &[Rule] = &[
    crate_rests,
    crate_slides_off_shifter,
    crate_winched_away,
    crate_swinched_away,
    crate_consumed_by_operator,
];

/// A crate stays only while it has support under it.
fn crate_rests(c: &Cursor) -> Option<Symbol> {
    Some(if is_support(c.at(0, 1)) { c.cur() } else { BLANK })
}

fn crate_slides_off_shifter(c: &Cursor) -> Option<Symbol> {
    let right = is_blank(c.at(1, 0)) && c.at(0, 1) == b'>';
    let left = is_blank(c.at(-1, 0)) && c.at(0, 1) == b'<';
    (right || left).then_some(BLANK)
}

/// Crates picked up by a winch. The up-left 'W' looks at `(2, -2)` as well,
/// the same cell the up-right one does.
fn crate_winched_away(c: &Cursor) -> Option<Symbol> {
    let cur = c.cur();
    let taken = (c.at(1, -1) == b'W' && c.at(2, -2) == cur)
        || (c.at(-1, -1) == b'W' && c.at(2, -2) == cur)
        || (c.at(1, 1) == b'M' && c.at(2, 2) == cur)
        || (c.at(-1, 1) == b'M' && c.at(-2, 2) == cur);
    taken.then_some(BLANK)
}

fn crate_swinched_away(c: &Cursor) -> Option<Symbol> {
    let is_swinch = |s: Symbol| s == b'A' || s == b'V';
    (is_swinch(c.at(1, 0)) || is_swinch(c.at(-1, 0))).then_some(BLANK)
}

/// Operands of '+' and '-' are used up by the operation.
fn crate_consumed_by_operator(c: &Cursor) -> Option<Symbol> {
    let is_op = |s: Symbol| s == b'+' || s == b'-';
    let left_operand = c.is_crate_at(-1, 0) && is_op(c.at(-1, -1));
    let right_operand = c.is_crate_at(1, 0) && is_op(c.at(1, -1));
    let under_operator = c.crate_beside() && is_op(c.at(0, -1));
    (left_operand || right_operand || under_operator).then_some(BLANK)
}

// ------------------------------------------------------------------ the pass

/// Next symbol for one cell, plus the value an I/O port emits while being
/// evaluated.
pub fn evaluate(c: &Cursor) -> (Symbol, Option<Emission>) {
    let cur = c.cur();
    let mut emission = None;
    let next = match classify(cur) {
        Category::Blank => last_match(BLANK_RULES, c).unwrap_or(cur),
        Category::DoorLeft => eval_gate(c, LEFT_GATE).unwrap_or(cur),
        Category::DoorRight => eval_gate(c, RIGHT_GATE).unwrap_or(cur),
        Category::Port => {
            emission = port_emission(c);
            swinch_toggle(c, b'V')
        }
        Category::Swinch if cur == b'A' => swinch_toggle(c, b'V'),
        Category::Swinch => swinch_toggle(c, b'A'),
        _ => cur,
    };

    if is_crate(cur) {
        return (last_match(CRATE_RULES, c).unwrap_or(next), emission);
    }
    (next, emission)
}

/// Evaluate every cell of the bounding box into `next`, sending port
/// emissions to `sink` in scan order. Returns the number of emissions.
pub fn rule_pass(current: &Grid, next: &mut Grid, sink: &mut dyn OutputSink) -> usize {
    let mut emitted = 0;
    for pos in current.bbox().positions() {
        let (symbol, emission) = evaluate(&Cursor::new(current, pos));
        if let Some(emission) = emission {
            trace!("[Engine] Port at ({}, {}) emits {:?}", pos.x, pos.y, emission);
            sink.emit(emission);
            emitted += 1;
        }
        next.set(pos, symbol);
    }
    emitted
}
