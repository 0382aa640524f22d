//! Kinematic integration for rockets and missiles.
//!
//! Motion is constant-speed linear travel toward a target point. Steps are
//! clamped to the remaining distance so nothing overshoots its target.

use hecs::{Entity, World};

use nova_core::components::{Missile, Rocket};
use nova_core::config::GameRules;
use nova_core::types::Point;

use crate::world_setup::HomingLock;

/// A missile that reached its aim point this tick.
#[derive(Debug, Clone, Copy)]
pub struct Detonation {
    pub at: Point,
    pub tracking: bool,
}

/// Move `from` toward `to` by at most `step`.
pub fn step_toward(from: Point, to: Point, step: f64) -> Point {
    let delta = to - from;
    let dist = delta.length();
    if dist <= step || dist == 0.0 {
        to
    } else {
        from + delta / dist * step
    }
}

/// Advance live rockets. Rockets already within the arrival epsilon are marked
/// dead and their target points returned, in iteration order, for impact resolution.
pub fn advance_rockets(world: &mut World, rules: &GameRules, dt: f64) -> Vec<Point> {
    let mut impacts = Vec::new();
    for (_entity, rocket) in world.query_mut::<&mut Rocket>() {
        if !rocket.alive {
            continue;
        }
        if rocket.position.distance(rocket.target) < rules.rocket_arrival_epsilon {
            rocket.alive = false;
            impacts.push(rocket.target);
        } else {
            rocket.position = step_toward(rocket.position, rocket.target, rocket.speed * dt);
        }
    }
    impacts
}

/// Re-aim tracking missiles at their rockets, then advance every missile.
/// Missiles within the arrival epsilon detonate and are returned.
pub fn advance_missiles(world: &mut World, rules: &GameRules, dt: f64) -> Vec<Detonation> {
    retarget_homing(world);

    let mut detonations = Vec::new();
    for (_entity, missile) in world.query_mut::<&mut Missile>() {
        if missile.detonated {
            continue;
        }
        if missile.position.distance(missile.target) < rules.missile_arrival_epsilon {
            missile.detonated = true;
            detonations.push(Detonation {
                at: missile.target,
                tracking: missile.tracking,
            });
        } else {
            missile.position = step_toward(missile.position, missile.target, missile.speed * dt);
        }
    }
    detonations
}

/// Point each tracking missile at its rocket's current position while the rocket
/// lives. Once the rocket is gone the missile keeps its last known aim point.
fn retarget_homing(world: &mut World) {
    let updates: Vec<(Entity, Point)> = world
        .query::<(&Missile, &HomingLock)>()
        .iter()
        .filter_map(|(entity, (_missile, lock))| {
            let rocket = world.get::<&Rocket>(lock.rocket).ok()?;
            rocket.alive.then_some((entity, rocket.position))
        })
        .collect();

    for (entity, target) in updates {
        if let Ok(mut missile) = world.get::<&mut Missile>(entity) {
            missile.target = target;
        }
    }
}
