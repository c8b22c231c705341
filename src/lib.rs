//! # czar-engine
//!
//! Session engine for round-based party card games: a prompt card each
//! round, players answer from their hands, and a rotating judge (the
//! "czar") picks a winner.
//!
//! ## Design Principles
//!
//! 1. **Partition, never duplicate**: Dealing moves a card out of its pool.
//!    A card can't be in two places until its deck is reset.
//!
//! 2. **Permissive init**: Hosts pass whatever partial state they have;
//!    the engine fills the rest with defaults.
//!
//! 3. **Injected content**: Card text comes from a `DeckProvider` given to
//!    the session at construction. No global game state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshots via `im-rs`.
//! - **Seeded RNG**: Shuffles and deals are reproducible per seed and can
//!   be checkpointed mid-game.
//!
//! ## Modules
//!
//! - `core`: Player IDs, RNG, configuration, errors
//! - `decks`: Deck categories, the provider trait, an in-memory library
//! - `session`: Session state, the engine, leaderboard

pub mod core;
pub mod decks;
pub mod session;

// Re-export commonly used types
pub use crate::core::{EngineConfig, GameRng, GameRngState, PlayerId, SessionError};

pub use crate::decks::{CardLibrary, DeckCategory, DeckDefinition, DeckProvider};

pub use crate::session::{
    Answer, Checkpoint, Decks, GameSession, Hand, LeaderboardEntry,
    PartialDecks, PartialSessionState, SessionState,
};
