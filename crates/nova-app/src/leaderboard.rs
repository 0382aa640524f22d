//! Session ratings and the high-score table.
//!
//! The table lives in memory; callers persist the JSON form wherever they like.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use nova_core::enums::{Difficulty, Rating};
use nova_core::events::SessionResult;

use crate::error::HostError;

/// Maximum number of entries kept.
pub const LEADERBOARD_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub difficulty: Difficulty,
    pub score: u32,
    pub intact_assets: u32,
    pub rating: Rating,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl LeaderboardEntry {
    pub fn from_result(difficulty: Difficulty, result: &SessionResult, timestamp: u64) -> Self {
        Self {
            difficulty,
            score: result.score,
            intact_assets: result.intact_assets,
            rating: Rating::from_intact_assets(result.intact_assets),
            timestamp,
        }
    }
}

/// Entries sorted by score, highest first. Equal scores keep arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Insert an entry. Returns its zero-based rank, or `None` if it did not make the table.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        if rank >= LEADERBOARD_CAPACITY {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(rank)
    }

    pub fn to_json(&self) -> Result<String, HostError> {
        serde_json::to_string(self).map_err(HostError::Leaderboard)
    }

    /// Parse a stored table. Order and capacity are re-established on load.
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let mut board: Leaderboard = serde_json::from_str(json).map_err(HostError::Leaderboard)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(LEADERBOARD_CAPACITY);
        Ok(board)
    }
}

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
