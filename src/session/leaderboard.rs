//! Score ranking.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One row of the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: PlayerId,
    pub score: i64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<PlayerId>, score: i64) -> Self {
        Self { name: name.into(), score }
    }
}

/// Rank scores highest first. Equal scores are ordered by name.
pub fn rank<'a, I>(scores: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = (&'a PlayerId, &'a i64)>,
{
    let mut board: Vec<_> = scores
        .into_iter()
        .map(|(name, &score)| LeaderboardEntry { name: name.clone(), score })
        .collect();
    board.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    board
}
