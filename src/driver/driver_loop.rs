//! Runs a loaded program generation by generation.
//!
//! Order within one iteration: draw (if due), compute the generation, flush
//! program output, then wait at the pacing point.

use std::fs::File;
use std::io::{self, BufWriter, Stdout};

use log::{info, warn};
use tokio::io::BufReader;
use tokio::sync::watch;

use crate::driver::pacing::{Pacing, Signal};
use crate::driver::run_config::RunConfig;
use crate::engine::grid::{Grid, Snapshot};
use crate::engine::port::{OutputSink, WriterSink};
use crate::engine::state::Machine;
use crate::engine::systems::{OutputLine, Renderer};
use crate::error::{Result, RubeError};

/// One interpreter run: the machine plus everything it talks to.
pub struct Driver {
    config: RunConfig,
    machine: Machine,
    sink: Box<dyn OutputSink + Send>,
    renderer: Option<Renderer<Stdout>>,
    pacing: Pacing,
}

impl Driver {
    /// Wire up a driver from `config` for an already loaded grid.
    pub fn new(config: RunConfig, grid: Grid) -> Result<Self> {
        let sink = output_sink(&config)?;
        let renderer = config.show_view.then(|| Renderer::new(io::stdout()));
        let pacing = if config.single_step {
            Pacing::Step(Box::new(BufReader::new(tokio::io::stdin())))
        } else if config.delay.is_zero() {
            Pacing::Free
        } else {
            Pacing::Delay(config.delay)
        };
        Ok(Self::with_parts(config, grid, sink, renderer, pacing))
    }

    /// Assemble a driver from explicit parts (used by tests).
    pub fn with_parts(
        config: RunConfig,
        grid: Grid,
        sink: Box<dyn OutputSink + Send>,
        renderer: Option<Renderer<Stdout>>,
        pacing: Pacing,
    ) -> Self {
        Driver {
            config,
            machine: Machine::new(grid),
            sink,
            renderer,
            pacing,
        }
    }

    /// Run until a quit signal, an interrupt, or the generation limit.
    /// Returns the final snapshot.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) -> Result<Snapshot> {
        info!(
            "[Driver] Starting '{}' (view={}, step={}, delay={:?})",
            self.config.program.display(),
            self.config.show_view,
            self.config.single_step,
            self.config.delay
        );
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.begin()?;
        }

        loop {
            if self.config.generations.is_some_and(|limit| self.machine.generation() >= limit) {
                info!("[Driver] Generation limit reached");
                break;
            }
            if self.config.draws(self.machine.generation()) {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.draw(self.machine.grid())?;
                }
            }

            self.machine.tick(self.sink.as_mut());
            self.sink.flush().map_err(RubeError::Output)?;

            if self.pacing.wait(&mut stop).await == Signal::Quit {
                break;
            }
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(self.machine.grid())?;
            renderer.finish()?;
        }
        info!("[Driver] Stopped after {} generation(s)", self.machine.generation());
        Ok(self.machine.snapshot())
    }
}

/// Where program output goes: a file if one was given, the output line of the
/// live view if it is on, plain stdout otherwise.
fn output_sink(config: &RunConfig) -> Result<Box<dyn OutputSink + Send>> {
    if let Some(path) = &config.output {
        let file = File::create(path).map_err(RubeError::Output)?;
        info!("[Driver] Writing program output to '{}'", path.display());
        return Ok(Box::new(WriterSink::new(BufWriter::new(file))));
    }
    if config.show_view {
        return Ok(Box::new(OutputLine::new(io::stdout())));
    }
    Ok(Box::new(WriterSink::new(io::stdout())))
}

/// Load `config.program`, run it, and print the final snapshot if asked.
/// Ctrl-C stops the run at the next pacing point.
pub async fn run(config: RunConfig) -> Result<()> {
    let grid = Grid::load(&config.program)?;
    let want_snapshot = config.snapshot;

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                warn!("[Driver] Couldn't listen for Ctrl-C: {}", e);
                // Keep the channel open so the run is not treated as stopped.
                stop_tx.closed().await;
            }
        }
    });

    let snapshot = Driver::new(config, grid)?.run(stop_rx).await?;
    if want_snapshot {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::port::MemorySink;
    use std::sync::{Arc, Mutex};

    /// Memory sink that can be inspected after the driver took ownership.
    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<MemorySink>>);

    impl OutputSink for SharedSink {
        fn emit(&mut self, emission: crate::engine::port::Emission) {
            self.0.lock().unwrap().emit(emission);
        }
    }

    fn headless(generations: Option<u64>) -> RunConfig {
        let mut config = RunConfig::new("test.rub");
        config.show_view = false;
        config.generations = generations;
        config
    }

    #[tokio::test]
    async fn runs_to_generation_limit() {
        let grid = Grid::from_rows(4, 6, &["1", " ", " ", "="]);
        let driver = Driver::with_parts(headless(Some(2)), grid, Box::new(MemorySink::new()), None, Pacing::Free);
        let (_tx, rx) = watch::channel(false);
        let snapshot = driver.run(rx).await.unwrap();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.rows, vec![" ", " ", "1", "="]);
    }

    #[tokio::test]
    async fn port_output_reaches_the_sink() {
        let grid = Grid::from_rows(4, 6, &["1", "0", "O", "b"]);
        let sink = SharedSink::default();
        let driver = Driver::with_parts(headless(Some(3)), grid, Box::new(sink.clone()), None, Pacing::Free);
        let (_tx, rx) = watch::channel(false);
        driver.run(rx).await.unwrap();
        assert_eq!(sink.0.lock().unwrap().text(), "16 ");
    }

    #[tokio::test]
    async fn step_input_quits_the_run() {
        let grid = Grid::from_rows(4, 4, &["=", "="]);
        let pacing = Pacing::Step(Box::new(&b"\nq\n"[..]));
        let driver = Driver::with_parts(headless(None), grid, Box::new(MemorySink::new()), None, pacing);
        let (_tx, rx) = watch::channel(false);
        let snapshot = driver.run(rx).await.unwrap();
        assert_eq!(snapshot.generation, 2);
    }

    #[tokio::test]
    async fn missing_program_fails_to_load() {
        let err = run(headless(Some(1)).with_program("/nonexistent/x.rub")).await.unwrap_err();
        assert!(matches!(err, RubeError::Load { .. }));
    }

    impl RunConfig {
        fn with_program(mut self, program: &str) -> Self {
            self.program = program.into();
            self
        }
    }
}
