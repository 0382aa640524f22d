//! Line protocol between the host process and its driver.
//!
//! Input (stdin): one JSON request per line, either a player command or a
//! host query. Output (stdout): one JSON message per line. Logs go to stderr.

use serde::{Deserialize, Serialize};

use nova_core::commands::PlayerCommand;
use nova_core::enums::{Difficulty, Outcome, Rating};
use nova_core::events::GameEvent;
use nova_core::state::GameStateSnapshot;

use crate::error::HostError;
use crate::leaderboard::LeaderboardEntry;

/// Requests answered by the host without touching the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostQuery {
    GetSnapshot,
    GetLeaderboard,
    Quit,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostRequest {
    Player(PlayerCommand),
    Host(HostQuery),
}

/// One output line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    Event {
        tick: u64,
        event: GameEvent,
    },
    /// Emitted once per finished session, after its `GameEnded` event.
    Summary {
        difficulty: Difficulty,
        outcome: Outcome,
        score: u32,
        intact_assets: u32,
        rating: Rating,
        /// Zero-based leaderboard position, if the score made the table.
        rank: Option<usize>,
    },
    Snapshot {
        snapshot: Option<Box<GameStateSnapshot>>,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Error {
        message: String,
    },
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_request(line: &str) -> Result<Option<HostRequest>, HostError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(HostError::CommandParse)
}
