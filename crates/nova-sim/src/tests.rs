//! Tests for the simulation engine, the command surface, collision scoring and
//! the ground asset state machines.

use hecs::World;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nova_core::commands::{PlayerCommand, PointerAction};
use nova_core::components::*;
use nova_core::config::{difficulty_settings, GameRules};
use nova_core::enums::*;
use nova_core::events::GameEvent;
use nova_core::state::GameStateSnapshot;
use nova_core::types::Point;

use crate::engine::{SimConfig, SimulationEngine};
use crate::session::Session;
use crate::systems::{assets, explosions, movement, spawner};
use crate::world_setup::{self, HomingLock};

const LEFT: Point = Point::new(50.0, 540.0);
const CENTER: Point = Point::new(400.0, 540.0);
const RIGHT: Point = Point::new(750.0, 540.0);

fn started(difficulty: Difficulty) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartSession { difficulty });
    engine.tick(0.0);
    engine
}

fn session(engine: &mut SimulationEngine) -> &mut Session {
    engine.session_mut().expect("session running")
}

/// A motionless rocket parked at `at`, aimed well away so it never arrives.
fn park_rocket(engine: &mut SimulationEngine, at: Point) -> hecs::Entity {
    world_setup::spawn_rocket(
        &mut session(engine).world,
        at,
        Point::new(at.x, at.y + 300.0),
        0.0,
    )
}

/// A motionless rocket about to land on `at`.
fn landing_rocket(engine: &mut SimulationEngine, at: Point) -> hecs::Entity {
    world_setup::spawn_rocket(
        &mut session(engine).world,
        Point::new(at.x, at.y - 1.0),
        at,
        0.0,
    )
}

fn blast(engine: &mut SimulationEngine, at: Point, origin: ExplosionOrigin) {
    let rules = engine.rules().clone();
    world_setup::spawn_explosion(
        &mut session(engine).world,
        &rules,
        at,
        rules.missile_blast_radius,
        origin,
    );
}

fn battery(snapshot: &GameStateSnapshot, id: usize) -> &nova_core::state::BatteryView {
    &snapshot.batteries[id]
}

fn count_events(snapshot: &GameStateSnapshot, pred: impl Fn(&GameEvent) -> bool) -> usize {
    snapshot.events.iter().filter(|e| pred(e)).count()
}

// ---- Lifecycle ----

#[test]
fn test_start_session_populates_ground_and_reports_ammo() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Difficulty::Normal,
    });
    let snap = engine.tick(0.0);

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.difficulty, Some(Difficulty::Normal));
    assert_eq!(snap.cities.len(), 6);
    assert_eq!(snap.batteries.len(), 3);
    assert_eq!(snap.score, 0);
    assert!(snap.rockets.is_empty());
    assert!(snap
        .events
        .contains(&GameEvent::ScoreChanged { score: 0 }));
    assert!(snap.events.contains(&GameEvent::AmmoChanged {
        battery: 1,
        ammo: 80
    }));
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::AmmoChanged { .. })),
        3
    );
}

#[test]
fn test_idle_engine_ignores_pointer_and_time() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(
        engine.handle_pointer(Point::new(400.0, 200.0)),
        PointerAction::Ignored
    );
    let snap = engine.tick(1.0);
    assert_eq!(snap.phase, GamePhase::Idle);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.cities.is_empty());
    assert_eq!(snap.win_score, 1000);
}

#[test]
fn test_stop_then_start_reinitializes() {
    let mut engine = started(Difficulty::Normal);
    engine.handle_pointer(Point::new(400.0, 200.0));
    let snap = engine.tick(0.0);
    assert_eq!(battery(&snap, 1).ammo, 79);

    engine.queue_command(PlayerCommand::StopSession);
    let snap = engine.tick(0.0);
    assert_eq!(snap.phase, GamePhase::Idle);
    assert!(snap.batteries.is_empty());
    assert!(engine.session().is_none());

    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Difficulty::Hard,
    });
    let snap = engine.tick(0.0);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.difficulty, Some(Difficulty::Hard));
    assert_eq!(battery(&snap, 1).ammo, 80);
    assert!(snap.missiles.is_empty());
    assert_eq!(snap.score, 0);
}

#[test]
fn test_restart_while_playing_discards_session() {
    let mut engine = started(Difficulty::Normal);
    park_rocket(&mut engine, Point::new(100.0, 100.0));
    session(&mut engine).score = 400;

    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Difficulty::Easy,
    });
    let snap = engine.tick(0.0);
    assert_eq!(snap.score, 0);
    assert!(snap.rockets.is_empty());
}

#[test]
fn test_malformed_dt_counts_as_zero() {
    let mut engine = started(Difficulty::Normal);
    for dt in [f64::NAN, f64::INFINITY, -1.0] {
        let snap = engine.tick(dt);
        assert_eq!(snap.time.elapsed_secs, 0.0);
        assert!(snap.rockets.is_empty());
    }
    let snap = engine.tick(0.5);
    assert!((snap.time.elapsed_secs - 0.5).abs() < 1e-12);
}

#[test]
fn test_queued_pointer_command_fires() {
    let mut engine = started(Difficulty::Normal);
    engine.queue_command(PlayerCommand::Pointer { x: 700.0, y: 100.0 });
    let snap = engine.tick(0.0);
    assert_eq!(battery(&snap, 2).ammo, 49);
    assert_eq!(snap.missiles.len(), 1);
    assert!(snap.events.contains(&GameEvent::MissileLaunched {
        battery: 2,
        tracking: false
    }));
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Difficulty::Hard,
    });
    let mut frames = Vec::new();
    for i in 0..900 {
        if i % 45 == 0 {
            let x = (i as f64 * 37.0) % 800.0;
            engine.queue_command(PlayerCommand::Pointer { x, y: 250.0 });
        }
        let snap = engine.tick(1.0 / 60.0);
        frames.push(serde_json::to_string(&snap).unwrap());
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_run(12345), scripted_run(12345));
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(scripted_run(111), scripted_run(222));
}

// ---- Spawner ----

#[test]
fn test_spawner_at_most_one_rocket_per_tick() {
    let rules = GameRules::default();
    let mut session = Session::new(Difficulty::Mythic, &rules);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let settings = difficulty_settings(Difficulty::Mythic);

    let spawned = spawner::run(&mut session, &mut rng, &settings, &rules, 100.0);
    assert!(spawned.is_some());
    assert_eq!(session.world.query::<&Rocket>().iter().count(), 1);
    assert_eq!(session.spawn_timer, 0.0);

    // Not yet past the interval again.
    assert!(spawner::run(&mut session, &mut rng, &settings, &rules, 0.5).is_none());
}

#[test]
fn test_spawned_rocket_targets_a_live_asset() {
    let rules = GameRules::default();
    let mut session = Session::new(Difficulty::Normal, &rules);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let settings = difficulty_settings(Difficulty::Normal);

    // Leave only the right battery standing.
    for &id in &session.city_ids {
        assets::destroy_city(&mut session.world.get::<&mut City>(id).unwrap());
    }
    for &id in &session.battery_ids[..2] {
        assets::destroy_battery(&mut session.world.get::<&mut Battery>(id).unwrap());
    }

    for _ in 0..20 {
        let entity = spawner::try_spawn(
            &mut session.world,
            &mut rng,
            &settings,
            &rules,
            &session.city_ids,
            &session.battery_ids,
        )
        .unwrap();
        let rocket = session.world.get::<&Rocket>(entity).unwrap();
        assert_eq!(rocket.target, RIGHT);
        assert_eq!(rocket.origin.y, 0.0);
        assert!(rocket.origin.x >= 0.0 && rocket.origin.x < rules.field_width);
        assert!(rocket.speed >= settings.rocket_speed_min && rocket.speed <= settings.rocket_speed_max);
    }
}

#[test]
fn test_spawner_skips_when_nothing_to_target() {
    let rules = GameRules::default();
    let mut session = Session::new(Difficulty::Normal, &rules);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let settings = difficulty_settings(Difficulty::Normal);

    for &id in &session.city_ids {
        assets::destroy_city(&mut session.world.get::<&mut City>(id).unwrap());
    }
    for &id in &session.battery_ids {
        assets::destroy_battery(&mut session.world.get::<&mut Battery>(id).unwrap());
    }

    assert!(spawner::run(&mut session, &mut rng, &settings, &rules, 10.0).is_none());
    assert_eq!(session.world.query::<&Rocket>().iter().count(), 0);
}

#[test]
fn test_spawner_survives_degenerate_field_width() {
    let rules = GameRules {
        field_width: 0.0,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(SimConfig { seed: 5, rules });
    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Difficulty::Mythic,
    });
    engine.tick(0.0);
    let snap = engine.tick(1.0);
    assert_eq!(snap.rockets.len(), 1);
    assert_eq!(snap.rockets[0].origin.x, 0.0);
}

// ---- Movement ----

#[test]
fn test_rocket_target_fixed_after_asset_destroyed() {
    let rules = GameRules::default();
    let mut world = World::new();
    let (city_ids, _) = world_setup::setup_ground(&mut world, &rules);
    let target = world.get::<&City>(city_ids[0]).unwrap().position;
    let rocket = world_setup::spawn_rocket(&mut world, Point::new(150.0, 0.0), target, 50.0);

    assets::destroy_city(&mut world.get::<&mut City>(city_ids[0]).unwrap());
    movement::advance_rockets(&mut world, &rules, 1.0);

    let rocket = world.get::<&Rocket>(rocket).unwrap();
    assert_eq!(rocket.target, target);
    assert_eq!(rocket.position, Point::new(150.0, 50.0));
}

#[test]
fn test_rocket_arrival_reports_impact_without_overshoot() {
    let rules = GameRules::default();
    let mut world = World::new();
    let target = Point::new(200.0, 100.0);
    let rocket = world_setup::spawn_rocket(&mut world, Point::new(200.0, 0.0), target, 1000.0);

    assert!(movement::advance_rockets(&mut world, &rules, 1.0).is_empty());
    assert_eq!(world.get::<&Rocket>(rocket).unwrap().position, target);

    let impacts = movement::advance_rockets(&mut world, &rules, 1.0);
    assert_eq!(impacts, vec![target]);
    assert!(!world.get::<&Rocket>(rocket).unwrap().alive);
}

#[test]
fn test_tracking_missile_follows_then_keeps_last_point() {
    let rules = GameRules::default();
    let mut world = World::new();
    let rocket = world_setup::spawn_rocket(
        &mut world,
        Point::new(400.0, 100.0),
        Point::new(400.0, 550.0),
        100.0,
    );
    let missile = world_setup::spawn_missile(
        &mut world,
        &rules,
        LEFT,
        Point::new(400.0, 100.0),
        Some(rocket),
    );
    assert!(world.get::<&HomingLock>(missile).is_ok());
    assert!(world.get::<&Missile>(missile).unwrap().tracking);

    movement::advance_rockets(&mut world, &rules, 0.1);
    movement::advance_missiles(&mut world, &rules, 0.01);
    assert_eq!(
        world.get::<&Missile>(missile).unwrap().target,
        Point::new(400.0, 110.0)
    );

    world.despawn(rocket).unwrap();
    movement::advance_missiles(&mut world, &rules, 0.01);
    assert_eq!(
        world.get::<&Missile>(missile).unwrap().target,
        Point::new(400.0, 110.0)
    );
}

#[test]
fn test_missile_detonates_within_epsilon() {
    let rules = GameRules::default();
    let mut world = World::new();
    let missile =
        world_setup::spawn_missile(&mut world, &rules, CENTER, Point::new(400.0, 300.0), None);

    // 240 units at 600/s: reaches the aim point in one 0.5 s step.
    assert!(movement::advance_missiles(&mut world, &rules, 0.5).is_empty());
    let detonations = movement::advance_missiles(&mut world, &rules, 0.5);
    assert_eq!(detonations.len(), 1);
    assert_eq!(detonations[0].at, Point::new(400.0, 300.0));
    assert!(!detonations[0].tracking);
    assert!(world.get::<&Missile>(missile).unwrap().detonated);
}

// ---- Command surface ----

#[test]
fn test_fire_from_nearest_battery() {
    let mut engine = started(Difficulty::Normal);
    let action = engine.handle_pointer(Point::new(300.0, 200.0));
    assert_eq!(
        action,
        PointerAction::Fire {
            battery: 1,
            target: Point::new(300.0, 200.0)
        }
    );
    let snap = engine.tick(0.0);
    let center = battery(&snap, 1);
    assert_eq!(center.ammo, 79);
    let expected = (200.0f64 - 540.0).atan2(300.0 - 400.0);
    assert!((center.aim_angle - expected).abs() < 1e-12);
    assert_eq!(snap.missiles.len(), 1);
    assert_eq!(snap.missiles[0].launch, CENTER);
    assert!(snap.events.contains(&GameEvent::AmmoChanged {
        battery: 1,
        ammo: 79
    }));
}

#[test]
fn test_fire_tie_goes_to_first_battery() {
    let mut engine = started(Difficulty::Normal);
    // |50 - 225| == |400 - 225|
    let action = engine.handle_pointer(Point::new(225.0, 100.0));
    assert!(matches!(action, PointerAction::Fire { battery: 0, .. }));
}

#[test]
fn test_fire_skips_empty_and_destroyed_batteries() {
    let mut engine = started(Difficulty::Normal);
    let ids = session(&mut engine).battery_ids.clone();
    session(&mut engine)
        .world
        .get::<&mut Battery>(ids[1])
        .unwrap()
        .ammo = 0;
    assets::destroy_battery(
        &mut session(&mut engine)
            .world
            .get::<&mut Battery>(ids[0])
            .unwrap(),
    );

    let action = engine.handle_pointer(Point::new(400.0, 100.0));
    assert!(matches!(action, PointerAction::Fire { battery: 2, .. }));

    session(&mut engine)
        .world
        .get::<&mut Battery>(ids[2])
        .unwrap()
        .ammo = 0;
    assert_eq!(
        engine.handle_pointer(Point::new(400.0, 100.0)),
        PointerAction::Ignored
    );
    let snap = engine.tick(0.0);
    assert_eq!(snap.missiles.len(), 1);
}

#[test]
fn test_pointer_on_intact_city_fires_instead_of_repairing() {
    let mut engine = started(Difficulty::Normal);
    let action = engine.handle_pointer(Point::new(150.0, 550.0));
    assert!(matches!(action, PointerAction::Fire { battery: 0, .. }));
    let snap = engine.tick(0.0);
    assert!(!snap.cities[0].destroyed);
    assert!(!snap.cities[0].repairing);
}

#[test]
fn test_city_destroy_and_repair_cycle() {
    let mut engine = started(Difficulty::Easy);
    let city = Point::new(150.0, 550.0);
    landing_rocket(&mut engine, city);
    let snap = engine.tick(0.01);
    assert!(snap.cities[0].destroyed);
    assert!(snap.events.contains(&GameEvent::CityDestroyed { city: 0 }));
    assert_eq!(snap.smoke.len(), 5);
    let ground = snap
        .explosions
        .iter()
        .find(|e| e.origin == ExplosionOrigin::GroundImpact)
        .unwrap();
    assert_eq!(ground.max_radius, 80.0);

    assert_eq!(
        engine.handle_pointer(city),
        PointerAction::RepairCity { city: 0 }
    );
    // Already repairing: the click falls through to firing.
    assert!(matches!(
        engine.handle_pointer(city),
        PointerAction::Fire { .. }
    ));

    let snap = engine.tick(5.0);
    assert!(snap.cities[0].repairing);
    assert!(snap.cities[0].destroyed);
    assert!((snap.cities[0].repair_progress - 0.5).abs() < 1e-9);

    let snap = engine.tick(5.0);
    assert!(!snap.cities[0].destroyed);
    assert!(snap.events.contains(&GameEvent::CityRepaired { city: 0 }));
}

#[test]
fn test_ground_miss_blast_is_small() {
    let mut engine = started(Difficulty::Normal);
    landing_rocket(&mut engine, Point::new(360.0, 550.0));
    let snap = engine.tick(0.01);
    assert!(snap.cities.iter().all(|c| !c.destroyed));
    assert!(snap.batteries.iter().all(|b| !b.destroyed));
    assert_eq!(snap.explosions.len(), 1);
    assert_eq!(snap.explosions[0].max_radius, 40.0);
    assert!(snap.smoke.is_empty());
}

#[test]
fn test_battery_repair_restores_ammo() {
    let rules = GameRules::default();
    let mut world = World::new();
    let (_, battery_ids) = world_setup::setup_ground(&mut world, &rules);
    {
        let mut battery = world.get::<&mut Battery>(battery_ids[0]).unwrap();
        assert!(assets::destroy_battery(&mut battery));
        assert_eq!(battery.ammo, 0);
        assert!(assets::begin_repair(&mut battery.state));
        assert!(!assets::begin_repair(&mut battery.state));
    }

    let mut events = Vec::new();
    assets::run(&mut world, &rules, 10.0, &mut events);
    assert!(events.is_empty());
    assets::run(&mut world, &rules, 10.0, &mut events);

    let battery = world.get::<&Battery>(battery_ids[0]).unwrap();
    assert_eq!(battery.state, AssetState::Intact);
    assert_eq!(battery.ammo, battery.max_ammo);
    assert!(events.contains(&GameEvent::BatteryRepaired { battery: 0 }));
    assert!(events.contains(&GameEvent::AmmoChanged {
        battery: 0,
        ammo: 50
    }));
}

#[test]
fn test_repair_on_intact_asset_is_noop() {
    let mut state = AssetState::Intact;
    assert!(!assets::begin_repair(&mut state));
    assert_eq!(state, AssetState::Intact);
    assert!(!assets::advance_repair(&mut state, 100.0, 10.0));
    assert_eq!(state, AssetState::Intact);
}

// ---- Shields ----

#[test]
fn test_shield_charge_then_absorb_keeps_ammo() {
    let mut engine = started(Difficulty::Easy);
    assert_eq!(
        engine.handle_pointer(CENTER),
        PointerAction::ChargeShield { battery: 1 }
    );
    // Charging: a second click on the battery fires instead.
    assert!(matches!(
        engine.handle_pointer(CENTER),
        PointerAction::Fire { battery: 1, .. }
    ));

    let snap = engine.tick(2.5);
    assert!(battery(&snap, 1).shield_charging);
    let snap = engine.tick(2.5);
    assert!(battery(&snap, 1).shield_active);
    assert!(snap.events.contains(&GameEvent::ShieldReady { battery: 1 }));
    let ammo = battery(&snap, 1).ammo;

    landing_rocket(&mut engine, CENTER);
    let snap = engine.tick(0.01);
    let center = battery(&snap, 1);
    assert!(!center.destroyed);
    assert!(!center.shield_active);
    assert_eq!(center.ammo, ammo);
    assert!(snap.events.contains(&GameEvent::ShieldAbsorbed { battery: 1 }));
    let shield_blast = snap
        .explosions
        .iter()
        .find(|e| e.origin == ExplosionOrigin::Shield)
        .unwrap();
    assert_eq!(shield_blast.center, Point::new(400.0, 520.0));
    assert_eq!(shield_blast.max_radius, 60.0);

    // Shield spent: the next impact destroys the battery.
    landing_rocket(&mut engine, CENTER);
    let snap = engine.tick(0.01);
    assert!(battery(&snap, 1).destroyed);
    assert_eq!(battery(&snap, 1).ammo, 0);
    assert!(snap.events.contains(&GameEvent::AmmoChanged {
        battery: 1,
        ammo: 0
    }));
}

#[test]
fn test_destroyed_battery_loses_shield_charge() {
    let rules = GameRules::default();
    let mut world = World::new();
    let (_, battery_ids) = world_setup::setup_ground(&mut world, &rules);
    let mut battery = world.get::<&mut Battery>(battery_ids[2]).unwrap();
    assert!(assets::begin_shield_charge(&mut battery));
    assert!(!assets::begin_shield_charge(&mut battery));
    assets::destroy_battery(&mut battery);
    assert_eq!(battery.shield, ShieldState::None);
    assert!(!assets::begin_shield_charge(&mut battery));
}

// ---- Collision and scoring ----

#[test]
fn test_overlapping_blasts_kill_once() {
    let mut engine = started(Difficulty::Normal);
    let at = Point::new(400.0, 200.0);
    park_rocket(&mut engine, at);
    blast(&mut engine, at, ExplosionOrigin::Player);
    blast(&mut engine, at, ExplosionOrigin::Player);
    let snap = engine.tick(0.01);
    assert_eq!(snap.score, 20);
    assert_eq!(snap.manual_kills, 1);
    assert!(snap.rockets.is_empty());
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::ScoreChanged { .. })),
        1
    );
}

#[test]
fn test_tracking_kills_score_but_do_not_count_toward_bonus() {
    let mut engine = started(Difficulty::Normal);
    let at = Point::new(400.0, 200.0);
    for _ in 0..5 {
        park_rocket(&mut engine, at);
    }
    blast(&mut engine, at, ExplosionOrigin::Tracking);
    let snap = engine.tick(0.01);
    assert_eq!(snap.score, 100);
    assert_eq!(snap.manual_kills, 0);
}

#[test]
fn test_bonus_launches_one_tracking_missile_per_intact_battery() {
    let mut engine = started(Difficulty::Normal);
    let ids = session(&mut engine).battery_ids.clone();
    assets::destroy_battery(
        &mut session(&mut engine)
            .world
            .get::<&mut Battery>(ids[2])
            .unwrap(),
    );

    let at = Point::new(400.0, 200.0);
    for _ in 0..10 {
        park_rocket(&mut engine, at);
    }
    let survivor = park_rocket(&mut engine, Point::new(100.0, 100.0));
    blast(&mut engine, at, ExplosionOrigin::Player);

    let snap = engine.tick(0.01);
    assert_eq!(snap.score, 200);
    assert_eq!(snap.manual_kills, 0);
    assert!(snap.events.contains(&GameEvent::TrackingBonus { missiles: 2 }));
    assert_eq!(snap.missiles.len(), 2);
    assert!(snap.missiles.iter().all(|m| m.tracking));
    assert!(snap.missiles.iter().all(|m| m.target == Point::new(100.0, 100.0)));
    assert_eq!(battery(&snap, 0).ammo, 50);
    assert_eq!(battery(&snap, 1).ammo, 80);

    let world = &session(&mut engine).world;
    assert!(world
        .query::<&HomingLock>()
        .iter()
        .all(|(_, lock)| lock.rocket == survivor));
}

#[test]
fn test_bonus_forfeited_without_live_rockets() {
    let mut engine = started(Difficulty::Normal);
    let at = Point::new(400.0, 200.0);
    for _ in 0..10 {
        park_rocket(&mut engine, at);
    }
    blast(&mut engine, at, ExplosionOrigin::Player);
    let snap = engine.tick(0.01);
    assert!(snap.events.contains(&GameEvent::TrackingBonus { missiles: 0 }));
    assert!(snap.missiles.is_empty());
    assert_eq!(snap.manual_kills, 0);
}

#[test]
fn test_expired_blast_still_kills_on_its_last_tick() {
    let mut engine = started(Difficulty::Normal);
    let rules = engine.rules().clone();
    let at = Point::new(300.0, 300.0);
    park_rocket(&mut engine, at);
    world_setup::spawn_explosion(
        &mut session(&mut engine).world,
        &rules,
        at,
        1.0,
        ExplosionOrigin::Player,
    );
    let snap = engine.tick(0.01);
    assert_eq!(snap.score, 20);
    assert!(snap.explosions.is_empty());
}

// ---- Terminal outcomes ----

#[test]
fn test_fifty_kills_win_with_all_assets() {
    let mut engine = started(Difficulty::Normal);
    let at = Point::new(400.0, 150.0);
    for _ in 0..50 {
        park_rocket(&mut engine, at);
    }
    blast(&mut engine, at, ExplosionOrigin::Player);

    let snap = engine.tick(0.01);
    assert_eq!(snap.phase, GamePhase::Won);
    assert_eq!(snap.score, 1000);
    let result = snap.result.unwrap();
    assert_eq!(result.outcome, Outcome::Won);
    assert_eq!(result.intact_assets, 9);
    assert_eq!(Rating::from_intact_assets(result.intact_assets), Rating::S);
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::GameEnded(_))),
        1
    );

    // Nothing runs after the outcome.
    let snap = engine.tick(1.0);
    assert_eq!(snap.phase, GamePhase::Won);
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::GameEnded(_))),
        0
    );
    assert_eq!(
        engine.handle_pointer(Point::new(400.0, 100.0)),
        PointerAction::Ignored
    );
}

#[test]
fn test_win_stops_at_threshold_kill() {
    let mut engine = started(Difficulty::Normal);
    session(&mut engine).score = 980;
    let at = Point::new(400.0, 150.0);
    for _ in 0..3 {
        park_rocket(&mut engine, at);
    }
    blast(&mut engine, at, ExplosionOrigin::Player);
    let snap = engine.tick(0.01);
    assert_eq!(snap.phase, GamePhase::Won);
    assert_eq!(snap.score, 1000);
}

#[test]
fn test_losing_every_battery_ends_session() {
    let mut engine = started(Difficulty::Normal);
    for at in [LEFT, CENTER, RIGHT] {
        landing_rocket(&mut engine, at);
    }
    let snap = engine.tick(0.01);
    assert_eq!(snap.phase, GamePhase::Lost);
    let result = snap.result.unwrap();
    assert_eq!(result.outcome, Outcome::Lost);
    assert_eq!(result.intact_assets, 6);
    assert_eq!(Rating::from_intact_assets(6), Rating::B);
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::BatteryDestroyed { .. })),
        3
    );
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::GameEnded(_))),
        1
    );

    let time = snap.time;
    let snap = engine.tick(1.0);
    assert_eq!(snap.time, time);
}

#[test]
fn test_losing_cities_alone_is_not_a_loss() {
    let mut engine = started(Difficulty::Normal);
    for x in [150.0, 220.0, 290.0, 440.0, 510.0, 580.0] {
        landing_rocket(&mut engine, Point::new(x, 550.0));
    }
    let snap = engine.tick(0.01);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert!(snap.cities.iter().all(|c| c.destroyed));
    assert!(snap.result.is_none());
}

// ---- Properties ----

proptest! {
    /// Repair progress stays within [0, 1] for any sequence of frame deltas.
    #[test]
    fn prop_repair_progress_bounded(dts in proptest::collection::vec(0.0f64..4.0, 1..40)) {
        let mut state = AssetState::Destroyed;
        assets::begin_repair(&mut state);
        for dt in dts {
            assets::advance_repair(&mut state, dt, 10.0);
            let p = state.repair_progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    /// Shield charge progress stays within [0, 1].
    #[test]
    fn prop_shield_progress_bounded(dts in proptest::collection::vec(0.0f64..2.0, 1..40)) {
        let mut shield = ShieldState::Charging { progress: 0.0 };
        for dt in dts {
            assets::advance_shield(&mut shield, dt, 5.0);
            let p = shield.charge_progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    /// Explosion radius never shrinks and never passes its max.
    #[test]
    fn prop_explosion_radius_monotonic(
        max_radius in 1.0f64..100.0,
        dts in proptest::collection::vec(0.0f64..0.5, 1..60),
    ) {
        let mut world = World::new();
        let rules = GameRules::default();
        let entity = world_setup::spawn_explosion(
            &mut world,
            &rules,
            Point::ZERO,
            max_radius,
            ExplosionOrigin::Player,
        );
        let mut last = 0.0;
        for dt in dts {
            explosions::run(&mut world, dt);
            let explosion = world.get::<&Explosion>(entity).unwrap();
            prop_assert!(explosion.radius >= last);
            prop_assert!(explosion.radius <= explosion.max_radius);
            last = explosion.radius;
        }
    }

    /// Ammo never exceeds max and never underflows under arbitrary clicking.
    #[test]
    fn prop_ammo_bounded(clicks in proptest::collection::vec((0.0f64..800.0, 0.0f64..600.0), 1..200)) {
        let mut engine = started(Difficulty::Normal);
        for (x, y) in clicks {
            engine.handle_pointer(Point::new(x, y));
            let snap = engine.tick(1.0 / 60.0);
            for b in &snap.batteries {
                prop_assert!(b.ammo <= b.max_ammo);
            }
        }
    }

    /// Each rocket scores exactly once however many blasts cover it.
    #[test]
    fn prop_single_kill_per_rocket(rockets in 1usize..40, blasts in 1usize..6) {
        let mut engine = started(Difficulty::Normal);
        let at = Point::new(400.0, 200.0);
        for _ in 0..rockets {
            park_rocket(&mut engine, at);
        }
        for _ in 0..blasts {
            blast(&mut engine, at, ExplosionOrigin::Player);
        }
        let snap = engine.tick(0.01);
        prop_assert_eq!(snap.score, rockets as u32 * 20);
        prop_assert!(snap.rockets.is_empty());
    }
}
