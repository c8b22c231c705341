//! Engine configuration.
//!
//! Hosts configure a session at construction time with an `EngineConfig`:
//! the default hand size used when an init fragment omits `handsize`, the
//! minimum number of active players required to start a round, the RNG
//! seed, and the key under which host payloads nest the session fragment.

use serde::{Deserialize, Serialize};

/// Hand size used when nothing else is specified.
pub const DEFAULT_HAND_SIZE: usize = 10;

/// Fewest active players that can start a round (one czar, two answers).
pub const DEFAULT_MIN_PLAYERS: usize = 3;

/// Key that wraps the session fragment in host payloads.
pub const DEFAULT_STATE_KEY: &str = "cah";

/// Complete engine configuration.
///
/// Serde-derivable so hosts can keep it next to their other settings;
/// every field falls back to its default when missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hand size applied when an init fragment has no `handsize`.
    pub default_hand_size: usize,

    /// Minimum active players for `start_round`.
    pub min_players: usize,

    /// Seed for shuffling and dealing.
    pub seed: u64,

    /// Name of the field that holds the session fragment in host payloads.
    pub state_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_hand_size: DEFAULT_HAND_SIZE,
            min_players: DEFAULT_MIN_PLAYERS,
            seed: 0,
            state_key: DEFAULT_STATE_KEY.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.default_hand_size = size;
        self
    }

    /// Set the minimum player count for starting a round.
    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_players = count;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the payload key that wraps the session fragment.
    #[must_use]
    pub fn with_state_key(mut self, key: impl Into<String>) -> Self {
        self.state_key = key.into();
        self
    }
}
