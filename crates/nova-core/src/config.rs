//! Tuning rules and difficulty presets.
//!
//! `GameRules` is serde-friendly so a host can load overrides from JSON;
//! any field left out falls back to the constant default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::Difficulty;

/// Spawn rate and rocket speed band for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Seconds between rocket spawns.
    pub spawn_interval_secs: f64,
    pub rocket_speed_min: f64,
    pub rocket_speed_max: f64,
}

/// Preset for a difficulty tier. Harder tiers spawn faster and fly faster.
pub fn difficulty_settings(difficulty: Difficulty) -> DifficultySettings {
    let (spawn_interval_secs, rocket_speed_min, rocket_speed_max) = match difficulty {
        Difficulty::Easy => (2.5, 20.0, 50.0),
        Difficulty::Normal => (1.8, 30.0, 70.0),
        Difficulty::Hard => (1.2, 50.0, 100.0),
        Difficulty::Extreme => (0.8, 80.0, 150.0),
        Difficulty::Mythic => (0.5, 120.0, 250.0),
    };
    DifficultySettings {
        spawn_interval_secs,
        rocket_speed_min,
        rocket_speed_max,
    }
}

/// One battery slot in the ground layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryLayout {
    pub label: String,
    pub x: f64,
    pub max_ammo: u32,
}

/// A rules value the simulation cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rule `{field}`: {reason}")]
pub struct InvalidRule {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Every tunable number the simulation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub field_width: f64,
    pub field_height: f64,

    pub win_score: u32,
    pub score_per_kill: u32,
    pub bonus_kill_threshold: u32,

    pub missile_speed: f64,
    pub missile_arrival_epsilon: f64,
    pub rocket_arrival_epsilon: f64,

    pub explosion_growth_rate: f64,
    pub missile_blast_radius: f64,
    pub ground_hit_blast_radius: f64,
    pub ground_miss_blast_radius: f64,
    pub shield_blast_radius: f64,
    pub shield_blast_offset_y: f64,

    pub city_hit_half_extent: f64,
    pub battery_hit_half_extent: f64,
    pub city_repair_secs: f64,
    pub battery_repair_secs: f64,
    pub shield_charge_secs: f64,

    pub smoke_burst_count: usize,

    /// City x positions; all cities sit `CITY_GROUND_OFFSET` above the bottom.
    pub city_xs: Vec<f64>,
    pub batteries: Vec<BatteryLayout>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            win_score: WIN_SCORE,
            score_per_kill: SCORE_PER_ROCKET,
            bonus_kill_threshold: BONUS_KILL_THRESHOLD,
            missile_speed: MISSILE_SPEED,
            missile_arrival_epsilon: MISSILE_ARRIVAL_EPSILON,
            rocket_arrival_epsilon: ROCKET_ARRIVAL_EPSILON,
            explosion_growth_rate: EXPLOSION_GROWTH_RATE,
            missile_blast_radius: MISSILE_BLAST_RADIUS,
            ground_hit_blast_radius: GROUND_HIT_BLAST_RADIUS,
            ground_miss_blast_radius: GROUND_MISS_BLAST_RADIUS,
            shield_blast_radius: SHIELD_BLAST_RADIUS,
            shield_blast_offset_y: SHIELD_BLAST_OFFSET_Y,
            city_hit_half_extent: CITY_HIT_HALF_EXTENT,
            battery_hit_half_extent: BATTERY_HIT_HALF_EXTENT,
            city_repair_secs: CITY_REPAIR_SECS,
            battery_repair_secs: BATTERY_REPAIR_SECS,
            shield_charge_secs: SHIELD_CHARGE_SECS,
            smoke_burst_count: SMOKE_BURST_COUNT,
            city_xs: default_city_xs(),
            batteries: default_batteries(),
        }
    }
}

impl GameRules {
    /// Y coordinate of every city.
    pub fn city_y(&self) -> f64 {
        self.field_height - CITY_GROUND_OFFSET
    }

    /// Y coordinate of every battery.
    pub fn battery_y(&self) -> f64 {
        self.field_height - BATTERY_GROUND_OFFSET
    }

    /// Total ground assets in the layout.
    pub fn asset_count(&self) -> usize {
        self.city_xs.len() + self.batteries.len()
    }

    /// Reject values that would stall or break the simulation: a field that is
    /// not positive, non-positive speeds or growth, and negative or non-finite
    /// radii, epsilons, extents and durations.
    pub fn validate(&self) -> Result<(), InvalidRule> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("missile_speed", self.missile_speed),
            ("explosion_growth_rate", self.explosion_growth_rate),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidRule {
                    field,
                    reason: "must be finite and greater than zero",
                });
            }
        }

        let non_negative = [
            ("missile_arrival_epsilon", self.missile_arrival_epsilon),
            ("rocket_arrival_epsilon", self.rocket_arrival_epsilon),
            ("missile_blast_radius", self.missile_blast_radius),
            ("ground_hit_blast_radius", self.ground_hit_blast_radius),
            ("ground_miss_blast_radius", self.ground_miss_blast_radius),
            ("shield_blast_radius", self.shield_blast_radius),
            ("city_hit_half_extent", self.city_hit_half_extent),
            ("battery_hit_half_extent", self.battery_hit_half_extent),
            ("city_repair_secs", self.city_repair_secs),
            ("battery_repair_secs", self.battery_repair_secs),
            ("shield_charge_secs", self.shield_charge_secs),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(InvalidRule {
                    field,
                    reason: "must be finite and not negative",
                });
            }
        }

        if !self.shield_blast_offset_y.is_finite() {
            return Err(InvalidRule {
                field: "shield_blast_offset_y",
                reason: "must be finite",
            });
        }
        if !self.city_xs.iter().all(|x| x.is_finite()) {
            return Err(InvalidRule {
                field: "city_xs",
                reason: "positions must be finite",
            });
        }
        if !self.batteries.iter().all(|b| b.x.is_finite()) {
            return Err(InvalidRule {
                field: "batteries",
                reason: "positions must be finite",
            });
        }
        Ok(())
    }
}

/// Two groups of three, leaving a gap around the center battery.
fn default_city_xs() -> Vec<f64> {
    (0..CITY_COUNT)
        .map(|i| {
            if i < 3 {
                150.0 + i as f64 * 70.0
            } else {
                440.0 + (i - 3) as f64 * 70.0
            }
        })
        .collect()
}

fn default_batteries() -> Vec<BatteryLayout> {
    [("left", 50.0, 50), ("center", 400.0, 80), ("right", 750.0, 50)]
        .into_iter()
        .map(|(label, x, max_ammo)| BatteryLayout {
            label: label.to_string(),
            x,
            max_ammo,
        })
        .collect()
}
