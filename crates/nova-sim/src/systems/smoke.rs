//! Smoke drift and fade.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nova_core::components::Smoke;
use nova_core::constants::{SMOKE_FADE_RATE, SMOKE_RISE_SPEED};

/// Rise, wobble sideways, fade. Cleanup removes particles at zero opacity.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt: f64) {
    for (_entity, smoke) in world.query_mut::<&mut Smoke>() {
        smoke.position.y -= SMOKE_RISE_SPEED * dt;
        smoke.position.x += rng.gen_range(-1.0..1.0) * dt;
        smoke.opacity -= SMOKE_FADE_RATE * dt;
    }
}
