//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems, not components;
//! the state enums only carry small read-only helpers.

use serde::{Deserialize, Serialize};

use crate::enums::ExplosionOrigin;
use crate::types::Point;

/// Hostile projectile falling toward a target point captured at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    /// Spawn point (trail start).
    pub origin: Point,
    pub position: Point,
    /// Target asset position at spawn time. Never re-resolved.
    pub target: Point,
    pub speed: f64,
    pub alive: bool,
}

/// Counter-projectile launched by a battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub launch: Point,
    pub position: Point,
    /// Aim point. Updated every tick for tracking missiles while their rocket lives.
    pub target: Point,
    pub speed: f64,
    /// Bonus missile that re-aims at a bound rocket.
    pub tracking: bool,
    pub detonated: bool,
}

/// Expanding blast. The only thing that destroys rockets in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Point,
    pub radius: f64,
    pub max_radius: f64,
    pub growth_rate: f64,
    pub origin: ExplosionOrigin,
    /// Set once `radius` reaches `max_radius`; removed at end of tick.
    pub expired: bool,
}

/// Decorative residue of a destroyed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smoke {
    pub position: Point,
    pub opacity: f64,
    pub size: f64,
}

/// Destruction/repair state shared by cities and batteries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum AssetState {
    #[default]
    Intact,
    Destroyed,
    /// Still destroyed while rebuilding. `progress` is in [0, 1].
    Repairing { progress: f64 },
}

impl AssetState {
    /// Destroyed or still under repair.
    pub fn is_destroyed(&self) -> bool {
        !matches!(self, AssetState::Intact)
    }

    pub fn is_repairing(&self) -> bool {
        matches!(self, AssetState::Repairing { .. })
    }

    pub fn repair_progress(&self) -> f64 {
        match self {
            AssetState::Repairing { progress } => *progress,
            _ => 0.0,
        }
    }
}

/// Battery shield sub-state, orthogonal to [`AssetState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ShieldState {
    #[default]
    None,
    /// `progress` is in [0, 1].
    Charging { progress: f64 },
    /// Absorbs exactly one impact.
    Active,
}

impl ShieldState {
    pub fn is_active(&self) -> bool {
        matches!(self, ShieldState::Active)
    }

    pub fn is_charging(&self) -> bool {
        matches!(self, ShieldState::Charging { .. })
    }

    pub fn charge_progress(&self) -> f64 {
        match self {
            ShieldState::Charging { progress } => *progress,
            _ => 0.0,
        }
    }
}

/// A defended city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub position: Point,
    pub state: AssetState,
}

/// A missile battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    pub id: u32,
    pub label: String,
    pub position: Point,
    pub ammo: u32,
    pub max_ammo: u32,
    pub state: AssetState,
    pub shield: ShieldState,
    /// Last fired aim angle in radians (cosmetic).
    pub aim_angle: f64,
}
