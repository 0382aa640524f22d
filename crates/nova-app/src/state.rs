//! Application state shared between the command reader, the event writer and
//! the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use nova_core::commands::PlayerCommand;
use nova_core::enums::Difficulty;
use nova_core::events::GameEvent;
use nova_core::state::GameStateSnapshot;

use crate::error::HostError;
use crate::leaderboard::Leaderboard;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Apply anything still queued, then stop the loop.
    Shutdown,
}

/// Events raised by one tick, tagged with the session they belong to.
#[derive(Debug, Clone)]
pub struct EventBatch {
    pub tick: u64,
    pub difficulty: Option<Difficulty>,
    pub events: Vec<GameEvent>,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` since it is Send but not Sync
/// - `Mutex<Option<...>>` holds state that does not exist before the loop starts
/// - `Arc<Mutex<...>>` holds state shared with other threads
pub struct AppState {
    /// `None` until the game loop has been spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub leaderboard: Arc<Mutex<Leaderboard>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            leaderboard: Arc::new(Mutex::new(Leaderboard::new())),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, command_tx: mpsc::Sender<GameLoopCommand>) {
        *self
            .command_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(command_tx);
    }

    /// Forward a player command to the game loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), HostError> {
        let tx = self
            .command_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match tx.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| HostError::LoopClosed),
            None => Err(HostError::LoopClosed),
        }
    }

    /// Ask the loop to stop. Detaches the sender so later sends fail fast.
    pub fn shutdown(&self) {
        let tx = self
            .command_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = tx {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
    }

    /// Latest snapshot, for polling.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn leaderboard(&self) -> Leaderboard {
        self.leaderboard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
