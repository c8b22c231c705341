//! Game sessions: state, the engine that drives it, and rankings.
//!
//! ## Key Types
//!
//! - `SessionState`: Full session shape (players, hands, decks, answers, scores)
//! - `PartialSessionState`: Optional-everything init fragment
//! - `GameSession`: The engine; deals, fills hands, tracks answers and rounds
//! - `Checkpoint`: State plus RNG positions for exact resumption
//! - `LeaderboardEntry`: One ranked `{name, score}` row

pub mod state;
pub mod engine;
pub mod leaderboard;

pub use state::{Answer, Decks, Hand, PartialDecks, PartialSessionState, SessionState};
pub use engine::{Checkpoint, GameSession};
pub use leaderboard::{rank, LeaderboardEntry};
