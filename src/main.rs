//! Main entry point for the RUBE interpreter.
//!
//! Parses the command line, initializes logging and hands the program to the
//! driver loop.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::error;

use rube::config::driver::{DEFAULT_DELAY_MS, DEFAULT_FRAME_SKIP};
use rube::driver::{self, RunConfig};

/// RUBE interpreter and debugger
#[derive(Parser)]
#[command(name = "rube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Disable the live playfield view
    #[arg(short = 'd', long)]
    no_debug: bool,

    /// Produce no output but program output
    #[arg(short, long)]
    quiet: bool,

    /// Write program output to a file instead of stdout
    #[arg(short = 'w', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Delay between generations in milliseconds
    #[arg(short = 'y', long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    delay: u64,

    /// Draw only every Nth generation
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_FRAME_SKIP)]
    frame_skip: u64,

    /// Advance one generation per line of input; 'q' quits
    #[arg(short, long)]
    step: bool,

    /// Stop after this many generations
    #[arg(short, long, value_name = "N")]
    generations: Option<u64>,

    /// Print the final playfield as JSON on exit
    #[arg(long)]
    snapshot: bool,

    /// Program source file
    program: PathBuf,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            program: cli.program,
            show_view: !(cli.no_debug || cli.quiet),
            quiet: cli.quiet,
            output: cli.output,
            delay: Duration::from_millis(cli.delay),
            frame_skip: cli.frame_skip.max(1),
            single_step: cli.step,
            generations: cli.generations,
            snapshot: cli.snapshot,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let config = RunConfig::from(Cli::parse());
    if !config.quiet {
        println!("RUBE interpreter v{}", env!("CARGO_PKG_VERSION"));
    }

    match driver::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[Driver] {}", e);
            eprintln!("Error : {}", e);
            ExitCode::FAILURE
        }
    }
}
