//! Snapshot system: queries the session world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use nova_core::components::*;
use nova_core::config::GameRules;
use nova_core::enums::GamePhase;
use nova_core::events::GameEvent;
use nova_core::state::*;

use crate::session::Session;

/// Build a snapshot. With no session the snapshot is empty apart from phase and rules.
pub fn build_snapshot(
    session: Option<&Session>,
    phase: GamePhase,
    rules: &GameRules,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let Some(session) = session else {
        return GameStateSnapshot {
            phase,
            win_score: rules.win_score,
            events,
            ..Default::default()
        };
    };

    let world = &session.world;
    GameStateSnapshot {
        time: session.time,
        phase,
        difficulty: Some(session.difficulty),
        score: session.score,
        win_score: rules.win_score,
        manual_kills: session.manual_kills,
        rockets: build_rockets(world),
        missiles: build_missiles(world),
        explosions: build_explosions(world),
        smoke: build_smoke(world),
        cities: build_cities(world, &session.city_ids),
        batteries: build_batteries(world, &session.battery_ids),
        events,
        result: session.result,
    }
}

/// Stable per-entity id for the render layer.
fn view_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

fn build_rockets(world: &World) -> Vec<RocketView> {
    let mut rockets: Vec<RocketView> = world
        .query::<&Rocket>()
        .iter()
        .filter(|(_, rocket)| rocket.alive)
        .map(|(entity, rocket)| RocketView {
            id: view_id(entity),
            origin: rocket.origin,
            position: rocket.position,
            target: rocket.target,
        })
        .collect();
    rockets.sort_by_key(|r| r.id);
    rockets
}

fn build_missiles(world: &World) -> Vec<MissileView> {
    let mut missiles: Vec<MissileView> = world
        .query::<&Missile>()
        .iter()
        .filter(|(_, missile)| !missile.detonated)
        .map(|(entity, missile)| MissileView {
            id: view_id(entity),
            launch: missile.launch,
            position: missile.position,
            target: missile.target,
            tracking: missile.tracking,
        })
        .collect();
    missiles.sort_by_key(|m| m.id);
    missiles
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut explosions: Vec<ExplosionView> = world
        .query::<&Explosion>()
        .iter()
        .map(|(entity, explosion)| ExplosionView {
            id: view_id(entity),
            center: explosion.center,
            radius: explosion.radius,
            max_radius: explosion.max_radius,
            origin: explosion.origin,
        })
        .collect();
    explosions.sort_by_key(|e| e.id);
    explosions
}

fn build_smoke(world: &World) -> Vec<SmokeView> {
    let mut smoke: Vec<SmokeView> = world
        .query::<&Smoke>()
        .iter()
        .map(|(entity, puff)| SmokeView {
            id: view_id(entity),
            position: puff.position,
            opacity: puff.opacity,
            size: puff.size,
        })
        .collect();
    smoke.sort_by_key(|s| s.id);
    smoke
}

fn build_cities(world: &World, city_ids: &[Entity]) -> Vec<CityView> {
    city_ids
        .iter()
        .filter_map(|&id| {
            let city = world.get::<&City>(id).ok()?;
            Some(CityView {
                id: city.id,
                position: city.position,
                destroyed: city.state.is_destroyed(),
                repairing: city.state.is_repairing(),
                repair_progress: city.state.repair_progress(),
            })
        })
        .collect()
}

fn build_batteries(world: &World, battery_ids: &[Entity]) -> Vec<BatteryView> {
    battery_ids
        .iter()
        .filter_map(|&id| {
            let battery = world.get::<&Battery>(id).ok()?;
            Some(BatteryView {
                id: battery.id,
                label: battery.label.clone(),
                position: battery.position,
                ammo: battery.ammo,
                max_ammo: battery.max_ammo,
                destroyed: battery.state.is_destroyed(),
                repairing: battery.state.is_repairing(),
                repair_progress: battery.state.repair_progress(),
                shield_active: battery.shield.is_active(),
                shield_charging: battery.shield.is_charging(),
                shield_charge_progress: battery.shield.charge_progress(),
                aim_angle: battery.aim_angle,
            })
        })
        .collect()
}
