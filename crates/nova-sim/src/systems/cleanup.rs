//! Cleanup system: removes entities that finished their lifecycle this tick.

use hecs::{Entity, World};

use nova_core::components::{Explosion, Missile, Rocket, Smoke};

/// Despawn dead rockets, detonated missiles, expired explosions and faded smoke.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, rocket) in world.query_mut::<&Rocket>() {
        if !rocket.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, missile) in world.query_mut::<&Missile>() {
        if missile.detonated {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.expired {
            despawn_buffer.push(entity);
        }
    }

    for (entity, smoke) in world.query_mut::<&Smoke>() {
        if smoke.opacity <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
