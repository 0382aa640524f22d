//! Nova Defense headless host.
//!
//! This crate drives the simulation on its own thread and exposes it over a
//! JSON line protocol: commands in, events and session summaries out.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod host;
pub mod ipc;
pub mod leaderboard;
pub mod state;

pub use error::HostError;
pub use nova_core as core;
