//! Simulation constants and tuning parameters.
//!
//! These are the defaults baked into [`crate::config::GameRules`].

// --- Field ---

/// Logical field width.
pub const FIELD_WIDTH: f64 = 800.0;

/// Logical field height.
pub const FIELD_HEIGHT: f64 = 600.0;

/// Nominal host frame rate (Hz). The simulation itself is delta-time driven.
pub const TICK_RATE: u32 = 60;

// --- Scoring ---

/// Score awarded per intercepted rocket.
pub const SCORE_PER_ROCKET: u32 = 20;

/// Score at which the session is won.
pub const WIN_SCORE: u32 = 1000;

/// Manual (non-tracking) kills needed to award the tracking-missile bonus.
pub const BONUS_KILL_THRESHOLD: u32 = 10;

// --- Missiles and explosions ---

/// Missile speed (units/s). Faster than any rocket preset.
pub const MISSILE_SPEED: f64 = 600.0;

/// Distance at which a missile detonates on its target point.
pub const MISSILE_ARRIVAL_EPSILON: f64 = 5.0;

/// Distance at which a rocket counts as having reached its target.
pub const ROCKET_ARRIVAL_EPSILON: f64 = 2.0;

/// Explosion radius growth (units/s).
pub const EXPLOSION_GROWTH_RATE: f64 = 120.0;

/// Max radius of a missile detonation (player or tracking).
pub const MISSILE_BLAST_RADIUS: f64 = 50.0;

/// Max radius of a ground impact that destroyed something.
pub const GROUND_HIT_BLAST_RADIUS: f64 = 80.0;

/// Max radius of a ground impact that hit nothing.
pub const GROUND_MISS_BLAST_RADIUS: f64 = 40.0;

/// Max radius of the defensive blast when a shield absorbs an impact.
pub const SHIELD_BLAST_RADIUS: f64 = 60.0;

/// Vertical offset of the shield blast above the battery.
pub const SHIELD_BLAST_OFFSET_Y: f64 = 20.0;

// --- Ground assets ---

/// Number of cities in the default layout.
pub const CITY_COUNT: usize = 6;

/// Number of batteries in the default layout.
pub const BATTERY_COUNT: usize = 3;

/// City hit box half-extent.
pub const CITY_HIT_HALF_EXTENT: f64 = 20.0;

/// Battery hit box half-extent.
pub const BATTERY_HIT_HALF_EXTENT: f64 = 25.0;

/// Cities sit this far above the bottom edge.
pub const CITY_GROUND_OFFSET: f64 = 50.0;

/// Batteries sit this far above the bottom edge.
pub const BATTERY_GROUND_OFFSET: f64 = 60.0;

/// Seconds to rebuild a destroyed city.
pub const CITY_REPAIR_SECS: f64 = 10.0;

/// Seconds to rebuild a destroyed battery.
pub const BATTERY_REPAIR_SECS: f64 = 20.0;

/// Seconds to charge a battery shield.
pub const SHIELD_CHARGE_SECS: f64 = 5.0;

// --- Smoke ---

/// Particles per smoke burst.
pub const SMOKE_BURST_COUNT: usize = 5;

/// Upward drift (units/s).
pub const SMOKE_RISE_SPEED: f64 = 5.0;

/// Opacity lost per second.
pub const SMOKE_FADE_RATE: f64 = 0.05;
