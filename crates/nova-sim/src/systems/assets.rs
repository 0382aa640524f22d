//! Ground asset state machines: destruction, repair and shield charging.
//!
//! City:    Intact -> Destroyed -> Repairing -> Intact
//! Battery: same, crossed with shield None -> Charging -> Active -> None.
//!
//! The transition functions are pure over component data; `run` drives the
//! timed transitions for one tick.

use hecs::World;

use nova_core::components::{AssetState, Battery, City, ShieldState};
use nova_core::config::GameRules;
use nova_core::events::GameEvent;

/// Add `dt / duration` to a progress fraction, clamped to 1.
fn accrue(progress: f64, dt: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (progress + dt / duration).min(1.0)
}

/// Destroyed -> Repairing. Any other state is left alone.
pub fn begin_repair(state: &mut AssetState) -> bool {
    if *state == AssetState::Destroyed {
        *state = AssetState::Repairing { progress: 0.0 };
        true
    } else {
        false
    }
}

/// Advance a repair. Returns true on the tick it completes (state becomes Intact).
pub fn advance_repair(state: &mut AssetState, dt: f64, duration: f64) -> bool {
    let AssetState::Repairing { progress } = *state else {
        return false;
    };
    let progress = accrue(progress, dt, duration);
    if progress >= 1.0 {
        *state = AssetState::Intact;
        true
    } else {
        *state = AssetState::Repairing { progress };
        false
    }
}

/// Shield None -> Charging, only on an intact battery.
pub fn begin_shield_charge(battery: &mut Battery) -> bool {
    if battery.state == AssetState::Intact && battery.shield == ShieldState::None {
        battery.shield = ShieldState::Charging { progress: 0.0 };
        true
    } else {
        false
    }
}

/// Advance a shield charge. Returns true on the tick the shield comes up.
pub fn advance_shield(shield: &mut ShieldState, dt: f64, duration: f64) -> bool {
    let ShieldState::Charging { progress } = *shield else {
        return false;
    };
    let progress = accrue(progress, dt, duration);
    if progress >= 1.0 {
        *shield = ShieldState::Active;
        true
    } else {
        *shield = ShieldState::Charging { progress };
        false
    }
}

/// Intact city -> Destroyed. Returns false if it was already down.
pub fn destroy_city(city: &mut City) -> bool {
    if city.state.is_destroyed() {
        return false;
    }
    city.state = AssetState::Destroyed;
    true
}

/// Intact battery -> Destroyed: ammo drops to zero and any shield or charge is lost.
pub fn destroy_battery(battery: &mut Battery) -> bool {
    if battery.state.is_destroyed() {
        return false;
    }
    battery.state = AssetState::Destroyed;
    battery.ammo = 0;
    battery.shield = ShieldState::None;
    true
}

/// Active shield -> None. Returns true if a shield was consumed.
pub fn consume_shield(battery: &mut Battery) -> bool {
    if battery.shield.is_active() {
        battery.shield = ShieldState::None;
        true
    } else {
        false
    }
}

/// Accrue repair and shield progress for every asset.
pub fn run(world: &mut World, rules: &GameRules, dt: f64, events: &mut Vec<GameEvent>) {
    for (_entity, city) in world.query_mut::<&mut City>() {
        if advance_repair(&mut city.state, dt, rules.city_repair_secs) {
            tracing::debug!(city = city.id, "city repaired");
            events.push(GameEvent::CityRepaired { city: city.id });
        }
    }

    for (_entity, battery) in world.query_mut::<&mut Battery>() {
        if advance_repair(&mut battery.state, dt, rules.battery_repair_secs) {
            battery.ammo = battery.max_ammo;
            tracing::debug!(battery = %battery.label, "battery repaired and rearmed");
            events.push(GameEvent::BatteryRepaired { battery: battery.id });
            events.push(GameEvent::AmmoChanged {
                battery: battery.id,
                ammo: battery.ammo,
            });
        }
        if battery.state == AssetState::Intact
            && advance_shield(&mut battery.shield, dt, rules.shield_charge_secs)
        {
            events.push(GameEvent::ShieldReady { battery: battery.id });
        }
    }
}
