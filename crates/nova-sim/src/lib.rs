//! Simulation engine for Nova Defense.
//!
//! Owns the per-session hecs world, runs the systems once per frame with the
//! host-measured delta time, and produces `GameStateSnapshot`s for rendering.

pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use nova_core as core;

#[cfg(test)]
mod tests;
