//! Game loop thread: runs the simulation engine at the configured rate and
//! publishes snapshots and events.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via an `mpsc` channel. Each tick is advanced by the measured
//! wall-clock time since the previous one. While no session is in play the
//! loop blocks on the channel instead of ticking.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use nova_core::constants::TICK_RATE;
use nova_core::enums::GamePhase;
use nova_core::state::GameStateSnapshot;
use nova_sim::engine::{SimConfig, SimulationEngine};

use crate::error::HostError;
use crate::state::{EventBatch, GameLoopCommand};

const THREAD_NAME: &str = "nova-game-loop";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Frames per second while a session is playing.
    pub tick_rate: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate: TICK_RATE,
        }
    }
}

impl LoopConfig {
    /// Nominal frame duration. A zero rate is treated as one frame per second.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. Events of every tick that
/// raised any are sent on `event_tx`.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    event_tx: mpsc::Sender<EventBatch>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), HostError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let tick_duration = config.tick_duration();

    let handle = std::thread::Builder::new()
        .name(THREAD_NAME.into())
        .spawn(move || {
            let engine = SimulationEngine::new(config.sim);
            run_game_loop(engine, tick_duration, cmd_rx, &latest_snapshot, &event_tx);
        })
        .map_err(|source| HostError::ThreadSpawn {
            name: THREAD_NAME,
            source,
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    tick_duration: Duration,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    event_tx: &mpsc::Sender<EventBatch>,
) {
    let mut last_frame = Instant::now();
    let mut next_tick_time = last_frame;

    loop {
        // 1. Nothing moves outside a session, so wait for a command.
        if engine.phase() != GamePhase::Playing {
            match cmd_rx.recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(_) => return,
            }
            // Time spent waiting is not simulated.
            last_frame = Instant::now();
            next_tick_time = last_frame;
        }

        // 2. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 3. Advance one frame by the elapsed wall-clock time
        let now = Instant::now();
        let dt = if engine.phase() == GamePhase::Playing {
            now.duration_since(last_frame).as_secs_f64()
        } else {
            0.0
        };
        last_frame = now;
        let snapshot = engine.tick(dt);

        // 4. Publish events and the latest snapshot
        publish(snapshot, latest_snapshot, event_tx);

        if shutdown {
            tracing::debug!("game loop stopped");
            return;
        }
        if engine.phase() != GamePhase::Playing {
            continue;
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn publish(
    snapshot: GameStateSnapshot,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    event_tx: &mpsc::Sender<EventBatch>,
) {
    let batch = (!snapshot.events.is_empty()).then(|| EventBatch {
        tick: snapshot.time.tick,
        difficulty: snapshot.difficulty,
        events: snapshot.events.clone(),
    });

    *latest_snapshot
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

    if let Some(batch) = batch {
        // A closed receiver only means nobody is listening.
        let _ = event_tx.send(batch);
    }
}
