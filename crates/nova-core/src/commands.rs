//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;
use crate::types::Point;

/// All possible host/player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a fresh session. Always rebuilds the whole population.
    StartSession { difficulty: Difficulty },
    /// Halt and discard the current session.
    StopSession,
    /// A pointer/tap at a field coordinate.
    Pointer { x: f64, y: f64 },
}

/// How a pointer event was classified and applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointerAction {
    RepairCity { city: u32 },
    RepairBattery { battery: u32 },
    ChargeShield { battery: u32 },
    Fire { battery: u32, target: Point },
    /// No eligible battery, or no session in play.
    Ignored,
}
