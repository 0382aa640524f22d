//! Host error types. The simulation itself is infallible; everything that can
//! fail lives at the process edge.

use std::path::PathBuf;

use thiserror::Error;

use nova_core::config::InvalidRule;

/// Top-level error type for the headless host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Rules file could not be read.
    #[error("failed to read rules file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rules file is not valid rules JSON.
    #[error("failed to parse rules file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Rules file parsed but holds values the simulation cannot run with.
    #[error("rules file '{}' rejected: {source}", .path.display())]
    ConfigInvalid {
        path: PathBuf,
        source: InvalidRule,
    },

    /// An input line is not a known command.
    #[error("invalid command: {0}")]
    CommandParse(#[source] serde_json::Error),

    /// Reading the command stream failed.
    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    /// Leaderboard JSON could not be encoded or decoded.
    #[error("leaderboard serialization failed: {0}")]
    Leaderboard(#[source] serde_json::Error),

    #[error("failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        name: &'static str,
        source: std::io::Error,
    },

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),

    /// The game loop is gone or was never started.
    #[error("game loop channel closed")]
    LoopClosed,
}
