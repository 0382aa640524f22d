//! Rocket spawner: one rocket per elapsed spawn interval, aimed at a random live asset.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nova_core::components::{Battery, City};
use nova_core::config::{DifficultySettings, GameRules};
use nova_core::types::Point;

use crate::session::Session;
use crate::world_setup;

/// Accumulate `dt` and spawn once the interval is exceeded.
///
/// The timer resets to zero rather than subtracting the interval, so a long
/// frame stall yields at most one rocket.
pub fn run(
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    settings: &DifficultySettings,
    rules: &GameRules,
    dt: f64,
) -> Option<Entity> {
    session.spawn_timer += dt;
    if session.spawn_timer <= settings.spawn_interval_secs {
        return None;
    }
    session.spawn_timer = 0.0;
    try_spawn(
        &mut session.world,
        rng,
        settings,
        rules,
        &session.city_ids,
        &session.battery_ids,
    )
}

/// Spawn one rocket at the top edge toward a uniformly chosen live asset.
/// Returns `None` without spawning when nothing is left to target.
pub fn try_spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    settings: &DifficultySettings,
    rules: &GameRules,
    city_ids: &[Entity],
    battery_ids: &[Entity],
) -> Option<Entity> {
    let targets = live_targets(world, city_ids, battery_ids);
    if targets.is_empty() {
        return None;
    }

    // An empty or non-finite field collapses spawns onto the left edge.
    let origin_x = if rules.field_width.is_finite() && rules.field_width > 0.0 {
        rng.gen_range(0.0..rules.field_width)
    } else {
        0.0
    };
    let origin = Point::new(origin_x, 0.0);
    let target = targets[rng.gen_range(0..targets.len())];
    let speed = if settings.rocket_speed_max > settings.rocket_speed_min {
        rng.gen_range(settings.rocket_speed_min..settings.rocket_speed_max)
    } else {
        settings.rocket_speed_min
    };

    Some(world_setup::spawn_rocket(world, origin, target, speed))
}

/// Positions of intact cities followed by intact batteries.
pub fn live_targets(world: &World, city_ids: &[Entity], battery_ids: &[Entity]) -> Vec<Point> {
    let cities = city_ids.iter().filter_map(|&id| {
        let city = world.get::<&City>(id).ok()?;
        (!city.state.is_destroyed()).then_some(city.position)
    });
    let batteries = battery_ids.iter().filter_map(|&id| {
        let battery = world.get::<&Battery>(id).ok()?;
        (!battery.state.is_destroyed()).then_some(battery.position)
    });
    cities.chain(batteries).collect()
}
