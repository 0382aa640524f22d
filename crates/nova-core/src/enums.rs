//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Difficulty tier selected by the host before a session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
    Mythic,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
        Difficulty::Mythic,
    ];
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running. The tick loop is halted.
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// The phase a session lands in after this outcome.
    pub fn phase(self) -> GamePhase {
        match self {
            Outcome::Won => GamePhase::Won,
            Outcome::Lost => GamePhase::Lost,
        }
    }
}

/// Performance rating derived from the number of intact assets at session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    /// 9 → S, ≥7 → A, ≥5 → B, ≥3 → C, ≥1 → D, otherwise F.
    ///
    /// Thresholds are absolute counts tuned for the default nine-asset layout.
    /// A custom layout with more assets still rates any count of nine or more as S.
    pub fn from_intact_assets(count: u32) -> Self {
        match count {
            9.. => Rating::S,
            7..=8 => Rating::A,
            5..=6 => Rating::B,
            3..=4 => Rating::C,
            1..=2 => Rating::D,
            0 => Rating::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::S => "S",
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::F => "F",
        }
    }
}

/// What produced an explosion. Only `Tracking` blasts are excluded from the
/// manual kill counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionOrigin {
    /// Player-fired missile detonation.
    #[default]
    Player,
    /// Bonus tracking missile detonation.
    Tracking,
    /// Rocket striking the ground.
    GroundImpact,
    /// Shield absorbing a rocket.
    Shield,
}
