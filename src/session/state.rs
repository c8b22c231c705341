//! Session state: the full shape and the partial init fragment.
//!
//! ## SessionState
//!
//! Everything a single game session knows:
//! - Active players, czar, hands, target hand size
//! - Undealt decks (`white`, `black`, `ud`)
//! - Answers for the current round, scores
//!
//! Uses `im` persistent collections so snapshots are O(1) clones.
//!
//! ## PartialSessionState
//!
//! The fragment a host passes to `GameSession::init`. Every field is
//! optional; `into_state` fills the gaps with defaults.

use im::{OrdMap, Vector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::core::{PlayerId, SessionError};
use crate::decks::DeckCategory;

/// Cards a player holds, in the order they were dealt.
pub type Hand = Vector<String>;

/// One player's submission for the current round.
///
/// Serializes as `[player, [cards...]]`. SmallVec keeps the usual
/// one- or two-card answers inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer(pub PlayerId, pub SmallVec<[String; 2]>);

impl Answer {
    /// Create an answer.
    pub fn new<I>(player: impl Into<PlayerId>, cards: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self(player.into(), cards.into_iter().map(Into::into).collect())
    }

    /// Who submitted this answer.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.0
    }

    /// The submitted card texts.
    #[must_use]
    pub fn cards(&self) -> &[String] {
        &self.1
    }
}

/// Undealt card pools. Dealt cards are removed, never copied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decks {
    /// Alternate response pool.
    pub ud: Vector<String>,
    /// Response cards.
    pub white: Vector<String>,
    /// Prompt cards.
    pub black: Vector<String>,
}

impl Decks {
    /// Get a pool by category.
    #[must_use]
    pub fn get(&self, category: DeckCategory) -> &Vector<String> {
        match category {
            DeckCategory::White => &self.white,
            DeckCategory::Black => &self.black,
            DeckCategory::Ud => &self.ud,
        }
    }

    /// Get a mutable pool by category.
    pub fn get_mut(&mut self, category: DeckCategory) -> &mut Vector<String> {
        match category {
            DeckCategory::White => &mut self.white,
            DeckCategory::Black => &mut self.black,
            DeckCategory::Ud => &mut self.ud,
        }
    }
}

/// Complete state of one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Players eligible to act, in seating order.
    #[serde(rename = "activePlayers")]
    pub active_players: Vector<PlayerId>,

    /// Current judge, if any.
    pub czar: Option<PlayerId>,

    /// Cards held per player. May include players that aren't active.
    pub hands: OrdMap<PlayerId, Hand>,

    /// Target hand size for `fix_hands`.
    pub handsize: usize,

    /// Undealt pools.
    pub decks: Decks,

    /// Submissions for the current round, in submission order.
    pub answers: Vector<Answer>,

    /// Score per player.
    pub scores: OrdMap<PlayerId, i64>,

    /// Prompt card in play for the current round.
    #[serde(default)]
    pub prompt: Option<String>,

    /// Rounds started so far.
    #[serde(default)]
    pub round: u32,

    /// Player awarded the current round, once the czar has judged it.
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl SessionState {
    /// Create an empty session with the given hand size.
    #[must_use]
    pub fn new(handsize: usize) -> Self {
        Self {
            active_players: Vector::new(),
            czar: None,
            hands: OrdMap::new(),
            handsize,
            decks: Decks::default(),
            answers: Vector::new(),
            scores: OrdMap::new(),
            prompt: None,
            round: 0,
            winner: None,
        }
    }

    /// Check if a player is in `active_players`.
    #[must_use]
    pub fn is_active(&self, player: &str) -> bool {
        self.active_players.iter().any(|p| p.as_str() == player)
    }

    /// Check if a player is the current czar.
    #[must_use]
    pub fn is_czar(&self, player: &str) -> bool {
        self.czar.as_ref().is_some_and(|c| c.as_str() == player)
    }

    /// Find a player's answer for this round.
    #[must_use]
    pub fn answer_of(&self, player: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.player().as_str() == player)
    }

    /// Serialize to the host-facing JSON shape.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Strictly parse a complete JSON snapshot.
    ///
    /// For partial or untrusted input use `PartialSessionState::from_value`.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Partial deck override. Missing pools default to empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialDecks {
    pub ud: Option<Vector<String>>,
    pub white: Option<Vector<String>>,
    pub black: Option<Vector<String>>,
}

impl PartialDecks {
    /// Create a full override from the three pools.
    pub fn new<U, W, B>(ud: U, white: W, black: B) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            ud: Some(ud.into_iter().map(Into::into).collect()),
            white: Some(white.into_iter().map(Into::into).collect()),
            black: Some(black.into_iter().map(Into::into).collect()),
        }
    }

    fn into_decks(self) -> Decks {
        Decks {
            ud: self.ud.unwrap_or_default(),
            white: self.white.unwrap_or_default(),
            black: self.black.unwrap_or_default(),
        }
    }
}

/// Init fragment: any subset of the session shape.
///
/// ## Example
///
/// ```
/// use czar_engine::session::PartialSessionState;
///
/// let partial = PartialSessionState::new()
///     .with_active_players(["jordan", "nancy", "cfs"])
///     .with_czar("cfs")
///     .with_handsize(2);
///
/// let state = partial.into_state(10);
/// assert_eq!(state.handsize, 2);
/// assert!(state.decks.white.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSessionState {
    #[serde(rename = "activePlayers")]
    pub active_players: Option<Vector<PlayerId>>,
    pub czar: Option<PlayerId>,
    pub hands: Option<OrdMap<PlayerId, Hand>>,
    pub handsize: Option<usize>,
    pub decks: Option<PartialDecks>,
    pub answers: Option<Vector<Answer>>,
    pub scores: Option<OrdMap<PlayerId, i64>>,
    pub prompt: Option<String>,
    pub round: Option<u32>,
    pub winner: Option<PlayerId>,
}

impl PartialSessionState {
    /// Create an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Permissively decode a fragment from JSON.
    ///
    /// Each recognized field is decoded on its own. A field with the wrong
    /// shape is dropped (and so takes its default) with a warning; anything
    /// that isn't an object yields an empty fragment.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!("session fragment is not an object, using defaults");
            }
            return Self::default();
        };

        let decks = match obj.get("decks") {
            None | Some(Value::Null) => None,
            Some(Value::Object(decks)) => Some(PartialDecks {
                ud: lenient_field(decks, "ud"),
                white: lenient_field(decks, "white"),
                black: lenient_field(decks, "black"),
            }),
            Some(_) => {
                tracing::warn!(field = "decks", "ignoring malformed session field");
                None
            }
        };

        Self {
            active_players: lenient_field(obj, "activePlayers"),
            czar: lenient_field(obj, "czar"),
            hands: lenient_field(obj, "hands"),
            handsize: lenient_field(obj, "handsize"),
            decks,
            answers: lenient_field(obj, "answers"),
            scores: lenient_field(obj, "scores"),
            prompt: lenient_field(obj, "prompt"),
            round: lenient_field(obj, "round"),
            winner: lenient_field(obj, "winner"),
        }
    }

    /// Set the active players.
    #[must_use]
    pub fn with_active_players<I>(mut self, players: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PlayerId>,
    {
        self.active_players = Some(players.into_iter().map(Into::into).collect());
        self
    }

    /// Set the czar.
    #[must_use]
    pub fn with_czar(mut self, czar: impl Into<PlayerId>) -> Self {
        self.czar = Some(czar.into());
        self
    }

    /// Set a player's hand.
    #[must_use]
    pub fn with_hand<I>(mut self, player: impl Into<PlayerId>, cards: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let hand = cards.into_iter().map(Into::into).collect();
        self.hands.get_or_insert_with(OrdMap::new).insert(player.into(), hand);
        self
    }

    /// Set the target hand size.
    #[must_use]
    pub fn with_handsize(mut self, handsize: usize) -> Self {
        self.handsize = Some(handsize);
        self
    }

    /// Override the decks.
    #[must_use]
    pub fn with_decks(mut self, decks: PartialDecks) -> Self {
        self.decks = Some(decks);
        self
    }

    /// Append an answer.
    #[must_use]
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.get_or_insert_with(Vector::new).push_back(answer);
        self
    }

    /// Set a player's score.
    #[must_use]
    pub fn with_score(mut self, player: impl Into<PlayerId>, score: i64) -> Self {
        self.scores.get_or_insert_with(OrdMap::new).insert(player.into(), score);
        self
    }

    /// Merge with defaults into a complete state.
    #[must_use]
    pub fn into_state(self, default_hand_size: usize) -> SessionState {
        SessionState {
            active_players: self.active_players.unwrap_or_default(),
            czar: self.czar,
            hands: self.hands.unwrap_or_default(),
            handsize: self.handsize.unwrap_or(default_hand_size),
            decks: self.decks.map(PartialDecks::into_decks).unwrap_or_default(),
            answers: self.answers.unwrap_or_default(),
            scores: self.scores.unwrap_or_default(),
            prompt: self.prompt,
            round: self.round.unwrap_or(0),
            winner: self.winner,
        }
    }
}

fn lenient_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    let value = obj.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(field = key, error = %err, "ignoring malformed session field");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fragment_defaults() {
        let state = PartialSessionState::new().into_state(10);

        assert!(state.active_players.is_empty());
        assert_eq!(state.czar, None);
        assert!(state.hands.is_empty());
        assert_eq!(state.handsize, 10);
        assert_eq!(state.decks, Decks::default());
        assert!(state.answers.is_empty());
        assert!(state.scores.is_empty());
        assert_eq!(state.round, 0);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_partial_decks_fill_individually() {
        let partial = PartialSessionState::new().with_decks(PartialDecks {
            white: Some(Vector::from(vec!["Carnies".to_string()])),
            ..PartialDecks::default()
        });
        let state = partial.into_state(10);

        assert_eq!(state.decks.white.len(), 1);
        assert!(state.decks.ud.is_empty());
        assert!(state.decks.black.is_empty());
    }

    #[test]
    fn test_answer_shape() {
        let answer = Answer::new("richleland", ["A robust mongoloid."]);
        assert_eq!(
            serde_json::to_value(&answer).unwrap(),
            json!(["richleland", ["A robust mongoloid."]])
        );
        assert_eq!(answer.player().as_str(), "richleland");
        assert_eq!(answer.cards(), ["A robust mongoloid."]);
    }

    #[test]
    fn test_state_json_shape() {
        let state = PartialSessionState::new()
            .with_active_players(["a", "b"])
            .with_score("a", 2)
            .into_state(5);

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["activePlayers"], json!(["a", "b"]));
        assert_eq!(value["scores"], json!({"a": 2}));
        assert_eq!(value["decks"], json!({"ud": [], "white": [], "black": []}));
        assert_eq!(value["handsize"], json!(5));
        assert_eq!(value["czar"], Value::Null);

        let back = SessionState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_from_value_reads_fields() {
        let partial = PartialSessionState::from_value(&json!({
            "activePlayers": ["jordan", "nancy"],
            "czar": "nancy",
            "answers": [["jordan", ["The invisible hand."]]],
            "handsize": 3
        }));

        assert_eq!(partial.czar, Some(PlayerId::from("nancy")));
        assert_eq!(partial.handsize, Some(3));
        assert_eq!(partial.answers.as_ref().map(Vector::len), Some(1));
        assert_eq!(partial.scores, None);
    }

    #[test]
    fn test_winner_carried_through_snapshot() {
        let partial = PartialSessionState::from_value(&json!({
            "activePlayers": ["jordan", "nancy"],
            "winner": "jordan"
        }));
        assert_eq!(partial.winner, Some(PlayerId::from("jordan")));

        let state = partial.into_state(10);
        let back = SessionState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(back.winner, Some(PlayerId::from("jordan")));

        // Snapshots written before the field existed still load.
        let legacy = json!({
            "activePlayers": [], "czar": null, "hands": {}, "handsize": 10,
            "decks": {"ud": [], "white": [], "black": []}, "answers": [], "scores": {}
        });
        assert_eq!(SessionState::from_json(&legacy.to_string()).unwrap().winner, None);
    }

    #[test]
    fn test_from_value_drops_malformed_fields() {
        let partial = PartialSessionState::from_value(&json!({
            "activePlayers": "everyone",
            "handsize": -2,
            "scores": {"max": 5},
            "decks": {"white": "Carnies", "black": ["pooped question"]}
        }));

        assert_eq!(partial.active_players, None);
        assert_eq!(partial.handsize, None);
        assert_eq!(partial.scores.as_ref().map(OrdMap::len), Some(1));

        let decks = partial.decks.clone().unwrap();
        assert_eq!(decks.white, None);
        assert_eq!(decks.black.map(|b| b.len()), Some(1));

        let state = partial.into_state(10);
        assert_eq!(state.handsize, 10);
        assert!(state.decks.white.is_empty());
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(PartialSessionState::from_value(&json!([1, 2])), PartialSessionState::default());
        assert_eq!(PartialSessionState::from_value(&Value::Null), PartialSessionState::default());
        assert_eq!(
            PartialSessionState::from_value(&json!({"decks": 7})).decks,
            None
        );
    }

    #[test]
    fn test_state_queries() {
        let state = PartialSessionState::new()
            .with_active_players(["joe", "mary"])
            .with_czar("mary")
            .with_answer(Answer::new("joe", ["what a dumb design"]))
            .into_state(10);

        assert!(state.is_active("joe"));
        assert!(!state.is_active("bowie"));
        assert!(state.is_czar("mary"));
        assert!(!state.is_czar("joe"));
        assert!(state.answer_of("joe").is_some());
        assert!(state.answer_of("mary").is_none());
    }
}
