//! Blast growth: radius grows linearly to its max, then the explosion expires.

use hecs::World;

use nova_core::components::Explosion;

/// Grow every explosion by `growth_rate * dt`, clamped to `max_radius`.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        grow(explosion, dt);
    }
}

/// Radius never shrinks. Reaching the max marks the explosion expired.
pub fn grow(explosion: &mut Explosion, dt: f64) {
    if explosion.expired {
        return;
    }
    explosion.radius = (explosion.radius + explosion.growth_rate * dt).min(explosion.max_radius);
    if explosion.radius >= explosion.max_radius {
        explosion.expired = true;
    }
}
