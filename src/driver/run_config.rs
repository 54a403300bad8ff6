use std::path::PathBuf;
use std::time::Duration;

use crate::config::driver::{DEFAULT_DELAY_MS, DEFAULT_FRAME_SKIP};

/// Runtime options for one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Program source file.
    pub program: PathBuf,
    /// Draw the live view of the playfield.
    pub show_view: bool,
    /// Print nothing but program output.
    pub quiet: bool,
    /// Send program output here instead of stdout.
    pub output: Option<PathBuf>,
    /// Pause between generations.
    pub delay: Duration,
    /// Draw only every Nth generation (at least 1).
    pub frame_skip: u64,
    /// Wait for a line on stdin before each generation.
    pub single_step: bool,
    /// Stop after this many generations.
    pub generations: Option<u64>,
    /// Print the final grid as JSON.
    pub snapshot: bool,
}

impl RunConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        RunConfig {
            program: program.into(),
            show_view: true,
            quiet: false,
            output: None,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            frame_skip: DEFAULT_FRAME_SKIP,
            single_step: false,
            generations: None,
            snapshot: false,
        }
    }

    /// Whether generation `generation` should be drawn.
    pub fn draws(&self, generation: u64) -> bool {
        self.show_view && generation % self.frame_skip.max(1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_skip_thins_out_frames() {
        let mut config = RunConfig::new("prog.rub");
        config.frame_skip = 3;
        let drawn: Vec<u64> = (0..10).filter(|g| config.draws(*g)).collect();
        assert_eq!(drawn, vec![0, 3, 6, 9]);
    }

    #[test]
    fn no_frames_without_view() {
        let mut config = RunConfig::new("prog.rub");
        config.show_view = false;
        assert!(!config.draws(0));
    }

    #[test]
    fn zero_frame_skip_draws_everything() {
        let mut config = RunConfig::new("prog.rub");
        config.frame_skip = 0;
        assert!(config.draws(1) && config.draws(2));
    }
}
