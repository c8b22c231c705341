//! Deck bucket names.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::SessionError;

/// One bucket of undealt cards in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckCategory {
    /// Response cards, dealt into hands.
    White,
    /// Prompt cards, one per round.
    Black,
    /// Alternate response pool.
    Ud,
}

impl DeckCategory {
    /// Every bucket, in session-shape order.
    pub const ALL: [DeckCategory; 3] = [DeckCategory::Ud, DeckCategory::White, DeckCategory::Black];

    /// The bucket's name as it appears in the session shape.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeckCategory::White => "white",
            DeckCategory::Black => "black",
            DeckCategory::Ud => "ud",
        }
    }
}

impl FromStr for DeckCategory {
    type Err = SessionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        DeckCategory::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| SessionError::UnknownCategory { category: name.to_owned() })
    }
}

impl std::fmt::Display for DeckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_buckets() {
        assert_eq!("white".parse::<DeckCategory>(), Ok(DeckCategory::White));
        assert_eq!("black".parse::<DeckCategory>(), Ok(DeckCategory::Black));
        assert_eq!("ud".parse::<DeckCategory>(), Ok(DeckCategory::Ud));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "green".parse::<DeckCategory>(),
            Err(SessionError::UnknownCategory { category: "green".into() })
        );
        // Names are case-sensitive, matching the session shape.
        assert!("White".parse::<DeckCategory>().is_err());
    }

    #[test]
    fn test_name_roundtrip() {
        for category in DeckCategory::ALL {
            assert_eq!(category.name().parse::<DeckCategory>(), Ok(category));
            assert_eq!(category.to_string(), category.name());
        }
    }
}
