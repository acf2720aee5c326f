//! Archenemy scheme-deck engine
//!
//! Library for building and playing Magic: The Gathering "Archenemy"
//! scheme decks: deck storage, the in-play session state machine, and
//! save/resume of play sessions across runs.

pub mod core;
pub mod error;
pub mod loader;
pub mod repo;
pub mod session;
pub mod store;
pub mod zones;

pub use error::{ArchenemyError, Result};
