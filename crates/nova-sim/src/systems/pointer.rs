//! Command surface: turns a pointer position into repair, shield or fire.
//!
//! Precedence, first match wins:
//! 1. destroyed city under the pointer, not already repairing -> repair it
//! 2. destroyed battery under the pointer, not already repairing -> repair it
//! 3. intact battery under the pointer with no shield and no charge -> charge shield
//! 4. otherwise fire from the intact, loaded battery nearest in x

use hecs::{Entity, World};

use nova_core::commands::PointerAction;
use nova_core::components::{AssetState, Battery, City, ShieldState};
use nova_core::config::GameRules;
use nova_core::events::GameEvent;
use nova_core::types::{within_box, Point};

use crate::session::Session;
use crate::systems::assets;
use crate::world_setup;

/// Decide what a pointer at `point` means without changing anything.
pub fn classify(
    world: &World,
    rules: &GameRules,
    city_ids: &[Entity],
    battery_ids: &[Entity],
    point: Point,
) -> PointerAction {
    for &id in city_ids {
        let Ok(city) = world.get::<&City>(id) else {
            continue;
        };
        if city.state == AssetState::Destroyed
            && within_box(city.position, rules.city_hit_half_extent, point)
        {
            return PointerAction::RepairCity { city: city.id };
        }
    }

    let batteries: Vec<(u32, Point, AssetState, ShieldState, u32)> = battery_ids
        .iter()
        .filter_map(|&id| {
            let b = world.get::<&Battery>(id).ok()?;
            Some((b.id, b.position, b.state, b.shield, b.ammo))
        })
        .collect();

    let under_pointer =
        |position: Point| within_box(position, rules.battery_hit_half_extent, point);

    if let Some(&(id, ..)) = batteries
        .iter()
        .find(|(_, pos, state, ..)| *state == AssetState::Destroyed && under_pointer(*pos))
    {
        return PointerAction::RepairBattery { battery: id };
    }

    if let Some(&(id, ..)) = batteries.iter().find(|(_, pos, state, shield, _)| {
        *state == AssetState::Intact && *shield == ShieldState::None && under_pointer(*pos)
    }) {
        return PointerAction::ChargeShield { battery: id };
    }

    // Nearest in x; the first battery in layout order wins ties.
    let mut shooter: Option<(u32, f64)> = None;
    for &(id, pos, state, _, ammo) in &batteries {
        if state.is_destroyed() || ammo == 0 {
            continue;
        }
        let dx = (pos.x - point.x).abs();
        if shooter.map_or(true, |(_, best)| dx < best) {
            shooter = Some((id, dx));
        }
    }

    match shooter {
        Some((battery, _)) => PointerAction::Fire {
            battery,
            target: point,
        },
        None => PointerAction::Ignored,
    }
}

/// Classify and apply a pointer event against the session.
pub fn handle(
    session: &mut Session,
    rules: &GameRules,
    point: Point,
    events: &mut Vec<GameEvent>,
) -> PointerAction {
    let action = classify(
        &session.world,
        rules,
        &session.city_ids,
        &session.battery_ids,
        point,
    );
    apply(session, rules, action, events);
    action
}

/// Apply a classified action.
pub fn apply(
    session: &mut Session,
    rules: &GameRules,
    action: PointerAction,
    events: &mut Vec<GameEvent>,
) {
    match action {
        PointerAction::RepairCity { city } => {
            if let Some(&id) = session.city_ids.get(city as usize) {
                if let Ok(mut city) = session.world.get::<&mut City>(id) {
                    if assets::begin_repair(&mut city.state) {
                        tracing::debug!(city = city.id, "city repair started");
                    }
                }
            }
        }
        PointerAction::RepairBattery { battery } => {
            if let Some(&id) = session.battery_ids.get(battery as usize) {
                if let Ok(mut battery) = session.world.get::<&mut Battery>(id) {
                    if assets::begin_repair(&mut battery.state) {
                        tracing::debug!(battery = %battery.label, "battery repair started");
                    }
                }
            }
        }
        PointerAction::ChargeShield { battery } => {
            if let Some(&id) = session.battery_ids.get(battery as usize) {
                if let Ok(mut battery) = session.world.get::<&mut Battery>(id) {
                    if assets::begin_shield_charge(&mut battery) {
                        tracing::debug!(battery = %battery.label, "shield charging");
                    }
                }
            }
        }
        PointerAction::Fire { battery, target } => fire(session, rules, battery, target, events),
        PointerAction::Ignored => {}
    }
}

/// Spend one round from `battery` and launch a missile at `target`.
fn fire(
    session: &mut Session,
    rules: &GameRules,
    battery: u32,
    target: Point,
    events: &mut Vec<GameEvent>,
) {
    let Some(&id) = session.battery_ids.get(battery as usize) else {
        return;
    };
    let from = {
        let Ok(mut battery) = session.world.get::<&mut Battery>(id) else {
            return;
        };
        if battery.state.is_destroyed() || battery.ammo == 0 {
            return;
        }
        battery.ammo -= 1;
        let delta = target - battery.position;
        battery.aim_angle = delta.y.atan2(delta.x);
        events.push(GameEvent::AmmoChanged {
            battery: battery.id,
            ammo: battery.ammo,
        });
        battery.position
    };

    world_setup::spawn_missile(&mut session.world, rules, from, target, None);
    events.push(GameEvent::MissileLaunched {
        battery,
        tracking: false,
    });
}
