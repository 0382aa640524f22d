//! Per-session state, rebuilt from scratch every time a session starts.

use hecs::{Entity, World};

use nova_core::components::{Battery, City};
use nova_core::config::GameRules;
use nova_core::enums::{Difficulty, Outcome};
use nova_core::events::{GameEvent, SessionResult};
use nova_core::types::SimTime;

use crate::world_setup;

/// Everything one playthrough owns. Nothing here outlives the session.
pub struct Session {
    pub world: World,
    pub difficulty: Difficulty,
    pub time: SimTime,
    pub score: u32,
    /// Kills by non-tracking explosions since the last bonus.
    pub manual_kills: u32,
    /// Seconds since the last spawn attempt.
    pub spawn_timer: f64,
    /// City entities in layout order.
    pub city_ids: Vec<Entity>,
    /// Battery entities in layout order.
    pub battery_ids: Vec<Entity>,
    pub result: Option<SessionResult>,
}

impl Session {
    /// Build a fresh session with the full ground layout intact.
    pub fn new(difficulty: Difficulty, rules: &GameRules) -> Self {
        let mut world = World::new();
        let (city_ids, battery_ids) = world_setup::setup_ground(&mut world, rules);
        Self {
            world,
            difficulty,
            time: SimTime::default(),
            score: 0,
            manual_kills: 0,
            spawn_timer: 0.0,
            city_ids,
            battery_ids,
            result: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Cities and batteries that are not destroyed (repairing counts as destroyed).
    pub fn intact_assets(&self) -> u32 {
        let cities = self
            .city_ids
            .iter()
            .filter(|&&id| {
                self.world
                    .get::<&City>(id)
                    .is_ok_and(|city| !city.state.is_destroyed())
            })
            .count();
        let batteries = self
            .battery_ids
            .iter()
            .filter(|&&id| {
                self.world
                    .get::<&Battery>(id)
                    .is_ok_and(|battery| !battery.state.is_destroyed())
            })
            .count();
        (cities + batteries) as u32
    }

    pub fn all_batteries_destroyed(&self) -> bool {
        self.battery_ids.iter().all(|&id| {
            self.world
                .get::<&Battery>(id)
                .map_or(true, |battery| battery.state.is_destroyed())
        })
    }

    /// Record the terminal outcome. Only the first call has any effect.
    pub fn finish(&mut self, outcome: Outcome, events: &mut Vec<GameEvent>) {
        if self.result.is_some() {
            return;
        }
        let result = SessionResult {
            outcome,
            intact_assets: self.intact_assets(),
            score: self.score,
        };
        tracing::info!(
            ?outcome,
            score = result.score,
            intact_assets = result.intact_assets,
            "session ended"
        );
        self.result = Some(result);
        events.push(GameEvent::GameEnded(result));
    }
}
