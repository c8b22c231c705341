//! Player identification.
//!
//! ## PlayerId
//!
//! Players are identified by the name the host gives them (a chat handle,
//! a username). The engine never interprets the text; it only compares it.
//! Serializes as a bare string so the host-facing session shape stays flat.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Player identifier.
///
/// Ordered so it can key the persistent maps in `SessionState`.
///
/// ```
/// use czar_engine::core::PlayerId;
///
/// let p = PlayerId::new("old nancy");
/// assert_eq!(p.as_str(), "old nancy");
/// assert_eq!(p, PlayerId::from("old nancy"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the raw player name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new("jordan");
        assert_eq!(p.as_str(), "jordan");
        assert_eq!(format!("{}", p), "jordan");
    }

    #[test]
    fn test_player_id_ordering() {
        let mut players = vec![PlayerId::from("max"), PlayerId::from("cole"), PlayerId::from("jason")];
        players.sort();
        let names: Vec<_> = players.iter().map(PlayerId::as_str).collect();
        assert_eq!(names, vec!["cole", "jason", "max"]);
    }

    #[test]
    fn test_player_id_borrow_lookup() {
        let mut scores = std::collections::BTreeMap::new();
        scores.insert(PlayerId::from("jorb"), 3);
        assert_eq!(scores.get("jorb"), Some(&3));
    }

    #[test]
    fn test_player_id_serializes_as_string() {
        let p = PlayerId::from("rhodes.json");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"rhodes.json\"");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
