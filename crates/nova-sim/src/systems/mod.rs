//! Systems that operate on the session world each tick.
//!
//! Systems are free functions over the world (or the whole `Session` when they
//! need asset handles or score). They do not own state.

pub mod assets;
pub mod cleanup;
pub mod collision;
pub mod explosions;
pub mod impact;
pub mod movement;
pub mod pointer;
pub mod smoke;
pub mod snapshot;
pub mod spawner;
