//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by the deck and session modules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, DEFAULT_HAND_SIZE, DEFAULT_MIN_PLAYERS, DEFAULT_STATE_KEY};
pub use error::SessionError;
