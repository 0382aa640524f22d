//! Headless Nova Defense runner.
//!
//! # Protocol
//!
//! Input (stdin): JSON commands, one per line
//! Output (stdout): JSON events and summaries, one per line
//! Logs (stderr): controlled by `RUST_LOG`

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;

use nova_app::config::load_rules;
use nova_app::game_loop::LoopConfig;
use nova_app::host::{self, SharedOutput};
use nova_app::HostError;
use nova_core::constants::TICK_RATE;
use nova_sim::SimConfig;

#[derive(Parser)]
#[command(name = "nova-defense")]
#[command(about = "Headless Nova Defense simulation host")]
#[command(version)]
struct Cli {
    /// RNG seed; the same seed and inputs replay the same session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Rules file (JSON). Missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second while a session is playing
    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), HostError> {
    let rules = load_rules(cli.config.as_deref())?;
    let config = LoopConfig {
        sim: SimConfig {
            seed: cli.seed,
            rules,
        },
        tick_rate: cli.tick_rate,
    };
    tracing::info!(seed = cli.seed, tick_rate = cli.tick_rate, "host starting");

    let output: SharedOutput = Arc::new(Mutex::new(io::stdout()));
    let board = host::serve(config, io::stdin().lock(), output)?;
    if let Some(best) = board.best() {
        tracing::info!(score = best.score, rating = best.rating.as_str(), "best session");
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "host failed");
            ExitCode::FAILURE
        }
    }
}
