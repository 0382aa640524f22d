//! Events emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::Outcome;

/// Terminal result reported once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: Outcome,
    /// Cities plus batteries not destroyed at the instant the session ended.
    pub intact_assets: u32,
    pub score: u32,
}

/// Discrete game events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    AmmoChanged { battery: u32, ammo: u32 },
    GameEnded(SessionResult),
    MissileLaunched { battery: u32, tracking: bool },
    TrackingBonus { missiles: u32 },
    CityDestroyed { city: u32 },
    BatteryDestroyed { battery: u32 },
    ShieldAbsorbed { battery: u32 },
    ShieldReady { battery: u32 },
    CityRepaired { city: u32 },
    BatteryRepaired { battery: u32 },
}
