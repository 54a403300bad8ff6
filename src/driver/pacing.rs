//! Per-generation pacing: a fixed delay, an interactive single step, or
//! nothing at all. Termination requests are observed at the same point.

use std::time::Duration;

use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

/// What the driver should do after a pacing point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Quit,
}

/// How the driver waits between generations.
pub enum Pacing {
    /// Run as fast as possible.
    Free,
    /// Sleep for a fixed time.
    Delay(Duration),
    /// Wait for a line of input; a line starting with `q` (or end of input) quits.
    Step(Box<dyn AsyncBufRead + Unpin + Send>),
}

impl Pacing {
    /// Wait for the next tick, or for `stop` to be raised. A stop channel whose
    /// sender is gone never fires.
    pub async fn wait(&mut self, stop: &mut watch::Receiver<bool>) -> Signal {
        if *stop.borrow() {
            return Signal::Quit;
        }
        tokio::select! {
            signal = self.tick() => signal,
            Ok(_) = stop.wait_for(|stopped| *stopped) => {
                info!("[Driver] Interrupted");
                Signal::Quit
            }
        }
    }

    async fn tick(&mut self) -> Signal {
        match self {
            Pacing::Free => {
                tokio::task::yield_now().await;
                Signal::Continue
            }
            Pacing::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Signal::Continue
            }
            Pacing::Step(input) => {
                let mut line = String::new();
                match input.read_line(&mut line).await {
                    Ok(0) | Err(_) => Signal::Quit,
                    Ok(_) if line.trim_start().starts_with(['q', 'Q']) => Signal::Quit,
                    Ok(_) => Signal::Continue,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_input(text: &'static str) -> Pacing {
        Pacing::Step(Box::new(text.as_bytes()))
    }

    #[tokio::test]
    async fn step_mode_advances_per_line_and_quits_on_q() {
        let (_tx, mut rx) = watch::channel(false);
        let mut pacing = step_input("\n\nq\n");
        assert_eq!(pacing.wait(&mut rx).await, Signal::Continue);
        assert_eq!(pacing.wait(&mut rx).await, Signal::Continue);
        assert_eq!(pacing.wait(&mut rx).await, Signal::Quit);
    }

    #[tokio::test]
    async fn step_mode_quits_at_end_of_input() {
        let (_tx, mut rx) = watch::channel(false);
        let mut pacing = step_input("");
        assert_eq!(pacing.wait(&mut rx).await, Signal::Quit);
    }

    #[tokio::test]
    async fn raised_stop_quits_immediately() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        let mut pacing = Pacing::Delay(Duration::from_secs(3600));
        assert_eq!(pacing.wait(&mut rx).await, Signal::Quit);
    }

    #[tokio::test]
    async fn free_running_continues() {
        let (_tx, mut rx) = watch::channel(false);
        assert_eq!(Pacing::Free.wait(&mut rx).await, Signal::Continue);
    }
}
