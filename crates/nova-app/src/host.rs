//! Headless host: wires the command stream, the game loop and the event writer.

use std::io::{BufRead, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use nova_core::events::GameEvent;

use crate::error::HostError;
use crate::game_loop::{self, LoopConfig};
use crate::ipc::{self, HostMessage, HostQuery, HostRequest};
use crate::leaderboard::{self, Leaderboard, LeaderboardEntry};
use crate::state::{AppState, EventBatch};

const WRITER_THREAD: &str = "nova-events";

/// Output sink shared by the reader and the event writer.
pub type SharedOutput = Arc<Mutex<dyn Write + Send>>;

/// Run a host session until `Quit` or end of input. Returns the final leaderboard.
pub fn serve(
    config: LoopConfig,
    input: impl BufRead,
    output: SharedOutput,
) -> Result<Leaderboard, HostError> {
    let state = AppState::new();
    let (event_tx, event_rx) = mpsc::channel();
    let writer = spawn_writer(event_rx, state.leaderboard.clone(), output.clone())?;
    let (cmd_tx, loop_thread) =
        game_loop::spawn_game_loop(config, state.latest_snapshot.clone(), event_tx)?;
    state.attach(cmd_tx);

    let pumped = pump(input, &state, &output);

    state.shutdown();
    loop_thread
        .join()
        .map_err(|_| HostError::ThreadPanicked("game loop"))?;
    writer
        .join()
        .map_err(|_| HostError::ThreadPanicked(WRITER_THREAD))?;
    pumped?;

    Ok(state.leaderboard())
}

/// Read requests until `Quit` or end of input.
fn pump(input: impl BufRead, state: &AppState, output: &SharedOutput) -> Result<(), HostError> {
    for line in input.lines() {
        let line = line.map_err(HostError::Input)?;
        match ipc::parse_request(&line) {
            Ok(None) => {}
            Ok(Some(HostRequest::Player(command))) => state.send_command(command)?,
            Ok(Some(HostRequest::Host(HostQuery::GetSnapshot))) => emit(
                output,
                &HostMessage::Snapshot {
                    snapshot: state.snapshot().map(Box::new),
                },
            ),
            Ok(Some(HostRequest::Host(HostQuery::GetLeaderboard))) => emit(
                output,
                &HostMessage::Leaderboard {
                    entries: state.leaderboard().entries().to_vec(),
                },
            ),
            Ok(Some(HostRequest::Host(HostQuery::Quit))) => break,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring input line");
                emit(
                    output,
                    &HostMessage::Error {
                        message: e.to_string(),
                    },
                );
            }
        }
    }
    Ok(())
}

/// Forward event batches to the output and record finished sessions.
fn spawn_writer(
    event_rx: mpsc::Receiver<EventBatch>,
    board: Arc<Mutex<Leaderboard>>,
    output: SharedOutput,
) -> Result<JoinHandle<()>, HostError> {
    std::thread::Builder::new()
        .name(WRITER_THREAD.into())
        .spawn(move || {
            for batch in event_rx {
                for event in batch.events {
                    let finished = match &event {
                        GameEvent::GameEnded(result) => Some(*result),
                        _ => None,
                    };
                    emit(
                        &output,
                        &HostMessage::Event {
                            tick: batch.tick,
                            event,
                        },
                    );

                    if let Some(result) = finished {
                        let difficulty = batch.difficulty.unwrap_or_default();
                        let entry = LeaderboardEntry::from_result(
                            difficulty,
                            &result,
                            leaderboard::unix_now(),
                        );
                        let rating = entry.rating;
                        let rank = board
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .record(entry);
                        tracing::info!(
                            score = result.score,
                            rating = rating.as_str(),
                            ?rank,
                            "session recorded"
                        );
                        emit(
                            &output,
                            &HostMessage::Summary {
                                difficulty,
                                outcome: result.outcome,
                                score: result.score,
                                intact_assets: result.intact_assets,
                                rating,
                                rank,
                            },
                        );
                    }
                }
            }
        })
        .map_err(|source| HostError::ThreadSpawn {
            name: WRITER_THREAD,
            source,
        })
}

/// Write one message as a JSON line. A closed output is logged, not fatal.
fn emit(output: &SharedOutput, message: &HostMessage) {
    let line = match serde_json::to_string(message) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode message");
            return;
        }
    };
    let mut out = output.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "failed to write message");
    }
}
