//! The transition engine.
//!
//! A generation reads only the current grid and writes a fresh next grid in
//! two passes: the rule pass decides every cell from its own neighbourhood,
//! then the fix pass applies the effects that move several cells at once.

pub mod cell;
pub mod types;
pub mod grid;
pub mod port;
pub mod state;
pub mod systems;

pub use grid::{Grid, Snapshot};
pub use port::{Emission, MemorySink, OutputSink, WriterSink};
pub use state::Machine;
pub use types::{BoundingBox, Position, Symbol, BLANK};

use systems::{fix_pass, rule_pass};

/// Compute the generation following `current`.
pub fn step(current: &Grid, sink: &mut dyn OutputSink) -> Grid {
    let mut next = current.clone();
    step_into(current, &mut next, sink);
    next
}

/// Like `step`, reusing `next` as the output buffer. Returns the number of
/// port emissions.
pub fn step_into(current: &Grid, next: &mut Grid, sink: &mut dyn OutputSink) -> usize {
    next.copy_from(current);
    let emitted = rule_pass(current, next, sink);
    fix_pass(current, next);
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_into_a_buffer_of_another_size() {
        let current = Grid::from_rows(6, 4, &["1", "0", "O", "b"]);
        let mut next = Grid::new(2, 2);
        let mut sink = MemorySink::new();
        assert_eq!(step_into(&current, &mut next, &mut sink), 1);
        assert_eq!(next, step(&current, &mut MemorySink::new()));
        assert_eq!((next.width(), next.height()), (6, 4));
    }
}
