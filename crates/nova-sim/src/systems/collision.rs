//! Collision and scoring: explosions against rockets, kill accounting,
//! the tracking-missile bonus and the win check.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nova_core::components::{Battery, Explosion, Rocket};
use nova_core::config::GameRules;
use nova_core::enums::{ExplosionOrigin, Outcome};
use nova_core::events::GameEvent;
use nova_core::types::Point;

use crate::session::Session;
use crate::world_setup;

struct Blast {
    center: Point,
    radius: f64,
    origin: ExplosionOrigin,
}

struct Target {
    entity: Entity,
    position: Point,
    alive: bool,
}

/// A bonus tracking missile waiting to be spawned after the pass.
struct BonusLaunch {
    battery: u32,
    from: Point,
    rocket: Entity,
    aim: Point,
}

/// Test every explosion against every live rocket.
///
/// A rocket inside a blast radius dies once, scores once, and is skipped by
/// every later blast. The win check runs after each kill, so the pass stops
/// at the kill that crosses the win score.
pub fn run(
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    rules: &GameRules,
    events: &mut Vec<GameEvent>,
) {
    let blasts: Vec<Blast> = session
        .world
        .query::<&Explosion>()
        .iter()
        .map(|(_, explosion)| Blast {
            center: explosion.center,
            radius: explosion.radius,
            origin: explosion.origin,
        })
        .collect();
    if blasts.is_empty() {
        return;
    }

    let mut targets: Vec<Target> = session
        .world
        .query::<&Rocket>()
        .iter()
        .filter(|(_, rocket)| rocket.alive)
        .map(|(entity, rocket)| Target {
            entity,
            position: rocket.position,
            alive: true,
        })
        .collect();

    let mut launches: Vec<BonusLaunch> = Vec::new();

    'blasts: for blast in &blasts {
        for i in 0..targets.len() {
            if !targets[i].alive || blast.center.distance(targets[i].position) >= blast.radius {
                continue;
            }
            targets[i].alive = false;
            session.score += rules.score_per_kill;

            if blast.origin != ExplosionOrigin::Tracking {
                session.manual_kills += 1;
                if session.manual_kills >= rules.bonus_kill_threshold {
                    session.manual_kills = 0;
                    let awarded = award_bonus(session, rng, &targets, &mut launches);
                    tracing::debug!(missiles = awarded, "tracking bonus awarded");
                    events.push(GameEvent::TrackingBonus { missiles: awarded });
                }
            }

            events.push(GameEvent::ScoreChanged {
                score: session.score,
            });
            if session.score >= rules.win_score {
                session.finish(Outcome::Won, events);
                break 'blasts;
            }
        }
    }

    for target in targets.iter().filter(|t| !t.alive) {
        if let Ok(mut rocket) = session.world.get::<&mut Rocket>(target.entity) {
            rocket.alive = false;
        }
    }

    for launch in launches {
        world_setup::spawn_missile(
            &mut session.world,
            rules,
            launch.from,
            launch.aim,
            Some(launch.rocket),
        );
        events.push(GameEvent::MissileLaunched {
            battery: launch.battery,
            tracking: true,
        });
    }
}

/// Queue one tracking missile per intact battery, each locked on a random
/// rocket still alive at this instant. With no live rockets the bonus is
/// forfeited. Returns the number of missiles queued.
fn award_bonus(
    session: &Session,
    rng: &mut ChaCha8Rng,
    targets: &[Target],
    launches: &mut Vec<BonusLaunch>,
) -> u32 {
    let live: Vec<&Target> = targets.iter().filter(|t| t.alive).collect();
    let mut awarded = 0;
    for &id in &session.battery_ids {
        let Ok(battery) = session.world.get::<&Battery>(id) else {
            continue;
        };
        if battery.state.is_destroyed() || live.is_empty() {
            continue;
        }
        let target = live[rng.gen_range(0..live.len())];
        launches.push(BonusLaunch {
            battery: battery.id,
            from: battery.position,
            rocket: target.entity,
            aim: target.position,
        });
        awarded += 1;
    }
    awarded
}
