//! Ground impact resolution for rockets that reached their target point.

use rand_chacha::ChaCha8Rng;

use nova_core::components::{Battery, City};
use nova_core::config::GameRules;
use nova_core::enums::{ExplosionOrigin, Outcome};
use nova_core::events::GameEvent;
use nova_core::types::{within_box, Point};

use crate::session::Session;
use crate::systems::assets;
use crate::world_setup;

/// Resolve one impact at `point`.
///
/// Every intact city whose box contains the point is destroyed. Every intact
/// battery whose box contains the point either loses its shield (spawning a
/// defensive blast) or is destroyed. A ground blast is always spawned, larger
/// if anything was destroyed. Losing the last battery ends the session.
pub fn resolve(
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    rules: &GameRules,
    point: Point,
    events: &mut Vec<GameEvent>,
) {
    let mut smoke_at: Vec<Point> = Vec::new();
    let mut shield_blasts: Vec<Point> = Vec::new();

    for &id in &session.city_ids {
        let Ok(mut city) = session.world.get::<&mut City>(id) else {
            continue;
        };
        if !within_box(city.position, rules.city_hit_half_extent, point) {
            continue;
        }
        if assets::destroy_city(&mut city) {
            tracing::debug!(city = city.id, "city destroyed");
            events.push(GameEvent::CityDestroyed { city: city.id });
            smoke_at.push(city.position);
        }
    }

    for &id in &session.battery_ids {
        let Ok(mut battery) = session.world.get::<&mut Battery>(id) else {
            continue;
        };
        if battery.state.is_destroyed()
            || !within_box(battery.position, rules.battery_hit_half_extent, point)
        {
            continue;
        }
        if assets::consume_shield(&mut battery) {
            tracing::debug!(battery = %battery.label, "shield absorbed impact");
            events.push(GameEvent::ShieldAbsorbed { battery: battery.id });
            shield_blasts.push(Point::new(
                battery.position.x,
                battery.position.y - rules.shield_blast_offset_y,
            ));
        } else if assets::destroy_battery(&mut battery) {
            tracing::debug!(battery = %battery.label, "battery destroyed");
            events.push(GameEvent::AmmoChanged {
                battery: battery.id,
                ammo: 0,
            });
            events.push(GameEvent::BatteryDestroyed { battery: battery.id });
            smoke_at.push(battery.position);
        }
    }

    let destroyed_any = !smoke_at.is_empty();
    for at in smoke_at {
        world_setup::spawn_smoke_burst(&mut session.world, rng, rules, at);
    }
    for center in shield_blasts {
        world_setup::spawn_explosion(
            &mut session.world,
            rules,
            center,
            rules.shield_blast_radius,
            ExplosionOrigin::Shield,
        );
    }

    let radius = if destroyed_any {
        rules.ground_hit_blast_radius
    } else {
        rules.ground_miss_blast_radius
    };
    world_setup::spawn_explosion(
        &mut session.world,
        rules,
        point,
        radius,
        ExplosionOrigin::GroundImpact,
    );

    if session.all_batteries_destroyed() {
        session.finish(Outcome::Lost, events);
    }
}
