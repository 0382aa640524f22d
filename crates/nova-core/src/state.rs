//! Game state snapshot: the complete visible state handed to the render layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, SessionResult};
use crate::types::{Point, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub score: u32,
    pub win_score: u32,
    pub manual_kills: u32,
    pub rockets: Vec<RocketView>,
    pub missiles: Vec<MissileView>,
    pub explosions: Vec<ExplosionView>,
    pub smoke: Vec<SmokeView>,
    pub cities: Vec<CityView>,
    pub batteries: Vec<BatteryView>,
    pub events: Vec<GameEvent>,
    pub result: Option<SessionResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketView {
    pub id: u64,
    pub origin: Point,
    pub position: Point,
    pub target: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub id: u64,
    pub launch: Point,
    pub position: Point,
    pub target: Point,
    pub tracking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: u64,
    pub center: Point,
    pub radius: f64,
    pub max_radius: f64,
    pub origin: ExplosionOrigin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeView {
    pub id: u64,
    pub position: Point,
    pub opacity: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub id: u32,
    pub position: Point,
    pub destroyed: bool,
    pub repairing: bool,
    pub repair_progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryView {
    pub id: u32,
    pub label: String,
    pub position: Point,
    pub ammo: u32,
    pub max_ammo: u32,
    pub destroyed: bool,
    pub repairing: bool,
    pub repair_progress: f64,
    pub shield_active: bool,
    pub shield_charging: bool,
    pub shield_charge_progress: f64,
    pub aim_angle: f64,
}
