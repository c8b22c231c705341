//! Session error taxonomy.

use thiserror::Error;

use super::player::PlayerId;

/// Errors raised by session operations.
///
/// `EmptyDeck` is the one expected during normal play; the caller decides
/// whether to reset the deck, skip the player, or end the round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("deck `{category}` has no cards left")]
    EmptyDeck { category: String },
    #[error("no deck named `{category}` in this session")]
    UnknownCategory { category: String },
    #[error("{player} is not an active player")]
    NotActive { player: PlayerId },
    #[error("{player} is the czar and cannot answer")]
    CzarCannotAnswer { player: PlayerId },
    #[error("{player} has already submitted an answer this round")]
    AlreadySubmitted { player: PlayerId },
    #[error("{player} does not hold `{card}`")]
    CardNotInHand { player: PlayerId, card: String },
    #[error("{player} submitted an empty answer")]
    EmptyAnswer { player: PlayerId },
    #[error("{player} has no answer this round")]
    NoSuchAnswer { player: PlayerId },
    #[error("this round was already awarded to {winner}")]
    RoundAlreadyJudged { winner: PlayerId },
    #[error("need {required} active players to start a round, have {active}")]
    NotEnoughPlayers { active: usize, required: usize },
    #[error("invalid session snapshot: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Snapshot(err.to_string())
    }
}

impl From<bincode::Error> for SessionError {
    fn from(err: bincode::Error) -> Self {
        SessionError::Snapshot(err.to_string())
    }
}
