//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the current session, processes player commands,
//! runs all systems once per frame, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nova_core::commands::{PlayerCommand, PointerAction};
use nova_core::components::Battery;
use nova_core::config::{difficulty_settings, GameRules};
use nova_core::enums::{Difficulty, ExplosionOrigin, GamePhase};
use nova_core::events::GameEvent;
use nova_core::state::GameStateSnapshot;
use nova_core::types::{sanitize_dt, Point};

use crate::session::Session;
use crate::systems;
use crate::world_setup;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub rules: GameRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: GameRules::default(),
        }
    }
}

/// The simulation engine. Owns the session and all sim state.
pub struct SimulationEngine {
    rules: GameRules,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    session: Option<Session>,
    events: Vec<GameEvent>,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            rules: config.rules,
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            session: None,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Malformed deltas (negative, NaN, infinite) count as zero.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems(sanitize_dt(dt));
            self.sync_phase();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(self.session.as_ref(), self.phase, &self.rules, events)
    }

    /// Classify and apply a pointer event immediately. Ignored unless playing.
    ///
    /// Any events it raises are delivered with the next snapshot.
    pub fn handle_pointer(&mut self, point: Point) -> PointerAction {
        if self.phase != GamePhase::Playing {
            return PointerAction::Ignored;
        }
        match self.session.as_mut() {
            Some(session) if !session.is_over() => {
                systems::pointer::handle(session, &self.rules, point, &mut self.events)
            }
            _ => PointerAction::Ignored,
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The session in play or just finished, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession { difficulty } => self.start_session(difficulty),
            PlayerCommand::StopSession => {
                if self.session.take().is_some() {
                    tracing::info!("session stopped");
                }
                self.phase = GamePhase::Idle;
            }
            PlayerCommand::Pointer { x, y } => {
                self.handle_pointer(Point::new(x, y));
            }
        }
    }

    /// Discard whatever was running and build a fresh session.
    fn start_session(&mut self, difficulty: Difficulty) {
        let session = Session::new(difficulty, &self.rules);
        tracing::info!(
            ?difficulty,
            cities = session.city_ids.len(),
            batteries = session.battery_ids.len(),
            "session started"
        );

        self.events.push(GameEvent::ScoreChanged { score: 0 });
        for &id in &session.battery_ids {
            if let Ok(battery) = session.world.get::<&Battery>(id) {
                self.events.push(GameEvent::AmmoChanged {
                    battery: battery.id,
                    ammo: battery.ammo,
                });
            }
        }

        self.session = Some(session);
        self.phase = GamePhase::Playing;
    }

    /// Move the phase to the terminal outcome once the session has one.
    fn sync_phase(&mut self) {
        if let Some(result) = self.session.as_ref().and_then(|s| s.result) {
            self.phase = result.outcome.phase();
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_over() {
            return;
        }
        let rules = &self.rules;
        let rng = &mut self.rng;
        let events = &mut self.events;
        let settings = difficulty_settings(session.difficulty);

        // 1. Spawning
        systems::spawner::run(session, rng, &settings, rules, dt);

        // 2. Rocket movement, then ground impacts
        let impacts = systems::movement::advance_rockets(&mut session.world, rules, dt);
        for point in impacts {
            systems::impact::resolve(session, rng, rules, point, events);
            if session.is_over() {
                return;
            }
        }

        // 3. Missile movement and detonation
        let detonations = systems::movement::advance_missiles(&mut session.world, rules, dt);
        for detonation in detonations {
            let origin = if detonation.tracking {
                ExplosionOrigin::Tracking
            } else {
                ExplosionOrigin::Player
            };
            world_setup::spawn_explosion(
                &mut session.world,
                rules,
                detonation.at,
                rules.missile_blast_radius,
                origin,
            );
        }

        // 4. Blast growth, smoke, asset timers
        systems::explosions::run(&mut session.world, dt);
        systems::smoke::run(&mut session.world, rng, dt);
        systems::assets::run(&mut session.world, rules, dt, events);

        // 5. Collision, scoring, bonus and win check
        systems::collision::run(session, rng, rules, events);

        // 6. Cleanup
        systems::cleanup::run(&mut session.world, &mut self.despawn_buffer);

        session.time.advance(dt);
    }
}
