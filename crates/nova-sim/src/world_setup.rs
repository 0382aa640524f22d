//! Entity spawn factories.
//!
//! Creates the ground layout and the rocket, missile, explosion and smoke
//! entities with their component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nova_core::components::*;
use nova_core::config::GameRules;
use nova_core::enums::ExplosionOrigin;
use nova_core::types::Point;

/// Binds a tracking missile to the rocket it chases.
#[derive(Debug, Clone, Copy)]
pub struct HomingLock {
    pub rocket: Entity,
}

/// Spawn every city and battery from the layout. Returns their handles in layout order.
pub fn setup_ground(world: &mut World, rules: &GameRules) -> (Vec<Entity>, Vec<Entity>) {
    let city_y = rules.city_y();
    let city_ids = rules
        .city_xs
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            world.spawn((City {
                id: i as u32,
                position: Point::new(x, city_y),
                state: AssetState::Intact,
            },))
        })
        .collect();

    let battery_y = rules.battery_y();
    let battery_ids = rules
        .batteries
        .iter()
        .enumerate()
        .map(|(i, layout)| {
            world.spawn((Battery {
                id: i as u32,
                label: layout.label.clone(),
                position: Point::new(layout.x, battery_y),
                ammo: layout.max_ammo,
                max_ammo: layout.max_ammo,
                state: AssetState::Intact,
                shield: ShieldState::None,
                aim_angle: -std::f64::consts::FRAC_PI_2,
            },))
        })
        .collect();

    (city_ids, battery_ids)
}

/// Spawn a rocket heading for a fixed target point.
pub fn spawn_rocket(world: &mut World, origin: Point, target: Point, speed: f64) -> Entity {
    world.spawn((Rocket {
        origin,
        position: origin,
        target,
        speed,
        alive: true,
    },))
}

/// Spawn a missile. A `homing` rocket makes it a tracking missile.
pub fn spawn_missile(
    world: &mut World,
    rules: &GameRules,
    from: Point,
    target: Point,
    homing: Option<Entity>,
) -> Entity {
    let missile = Missile {
        launch: from,
        position: from,
        target,
        speed: rules.missile_speed,
        tracking: homing.is_some(),
        detonated: false,
    };
    match homing {
        Some(rocket) => world.spawn((missile, HomingLock { rocket })),
        None => world.spawn((missile,)),
    }
}

/// Spawn a zero-radius explosion that grows to `max_radius`.
pub fn spawn_explosion(
    world: &mut World,
    rules: &GameRules,
    center: Point,
    max_radius: f64,
    origin: ExplosionOrigin,
) -> Entity {
    world.spawn((Explosion {
        center,
        radius: 0.0,
        max_radius,
        growth_rate: rules.explosion_growth_rate,
        origin,
        expired: false,
    },))
}

/// Spawn a burst of smoke around a destroyed asset.
pub fn spawn_smoke_burst(world: &mut World, rng: &mut ChaCha8Rng, rules: &GameRules, at: Point) {
    for _ in 0..rules.smoke_burst_count {
        let position = Point::new(
            at.x + rng.gen_range(-10.0..10.0),
            at.y + rng.gen_range(-5.0..5.0),
        );
        world.spawn((Smoke {
            position,
            opacity: rng.gen_range(0.4..0.7),
            size: rng.gen_range(10.0..25.0),
        },));
    }
}
