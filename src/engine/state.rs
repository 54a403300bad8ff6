use log::debug;

use crate::engine::grid::{Grid, Snapshot};
use crate::engine::port::OutputSink;
use crate::engine::step_into;

/// A running program: the current generation, a scratch buffer for the next
/// one, and a generation counter.
#[derive(Debug, Clone)]
pub struct Machine {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl Machine {
    // Start a program from its loaded grid
    pub fn new(grid: Grid) -> Self {
        Machine {
            next: grid.clone(),
            current: grid,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.current, self.generation)
    }

    /// Compute the next generation and make it current.
    pub fn tick(&mut self, sink: &mut dyn OutputSink) {
        let emitted = step_into(&self.current, &mut self.next, sink);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        debug!("[Engine] Generation {} done, {} emission(s)", self.generation, emitted);
    }

    pub fn into_grid(self) -> Grid {
        self.current
    }
}
