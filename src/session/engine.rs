//! The game session engine.
//!
//! `GameSession` exclusively owns one session's state, its RNG streams and
//! its deck provider. Every operation is a synchronous in-memory transition;
//! the only outward call is `reset_decks` reading the provider's pools.
//!
//! ## Round flow
//!
//! ```
//! use czar_engine::core::PlayerId;
//! use czar_engine::decks::{CardLibrary, DeckDefinition};
//! use czar_engine::session::{GameSession, PartialSessionState};
//!
//! let library = CardLibrary::new().with_deck(
//!     "main",
//!     DeckDefinition::new(
//!         (0..30).map(|i| format!("answer {i}")),
//!         ["_____. That's how I want to die.", "_____: good to the last drop."],
//!     ),
//! );
//!
//! let mut session = GameSession::new(library);
//! session.init(Some(
//!     PartialSessionState::new()
//!         .with_active_players(["max", "jason", "cole"])
//!         .with_handsize(3),
//! ));
//! session.reset_decks();
//!
//! session.start_round().unwrap();
//! assert_eq!(session.state().czar.as_ref().map(|c| c.as_str()), Some("max"));
//!
//! let card = session.state().hands["jason"][0].clone();
//! session.submit_answer("jason", [card]).unwrap();
//! assert_eq!(session.who_hasnt_answered(), vec![PlayerId::from("cole")]);
//!
//! session.pick_winner("jason").unwrap();
//! assert_eq!(session.get_leaderboard()[0].name.as_str(), "jason");
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::leaderboard::{rank, LeaderboardEntry};
use super::state::{Answer, PartialSessionState, SessionState};
use crate::core::{EngineConfig, GameRng, GameRngState, PlayerId, SessionError};
use crate::decks::{DeckCategory, DeckProvider};

/// Session state plus RNG positions, enough to resume dealing exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: SessionState,
    pub shuffle_rng: GameRngState,
    pub deal_rng: GameRngState,
}

impl Checkpoint {
    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A single game session.
pub struct GameSession<P: DeckProvider> {
    provider: P,
    config: EngineConfig,
    state: SessionState,
    /// Stream used by `reset_decks`.
    shuffle_rng: GameRng,
    /// Stream used to pick each dealt card.
    deal_rng: GameRng,
}

impl<P: DeckProvider> GameSession<P> {
    /// Create a session with default configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(provider: P, config: EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            provider,
            state: SessionState::new(config.default_hand_size),
            shuffle_rng: rng.for_context("shuffle"),
            deal_rng: rng.for_context("deal"),
            config,
        }
    }

    // === Accessors ===

    /// The full, defaulted session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable provider access, e.g. for `set_modes` before `reset_decks`.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    // === Initialization ===

    /// Replace the session state with `partial` merged over defaults.
    ///
    /// Explicit decks are taken verbatim; the provider is not consulted.
    pub fn init(&mut self, partial: Option<PartialSessionState>) {
        self.state = partial
            .unwrap_or_default()
            .into_state(self.config.default_hand_size);
        tracing::info!(
            players = self.state.active_players.len(),
            white = self.state.decks.white.len(),
            black = self.state.decks.black.len(),
            handsize = self.state.handsize,
            "session initialized"
        );
    }

    /// Initialize from a host payload holding the fragment under
    /// `config.state_key`. Malformed input degrades to defaults.
    pub fn init_from_value(&mut self, payload: &Value) {
        let partial = payload
            .get(&self.config.state_key)
            .map(PartialSessionState::from_value)
            .unwrap_or_default();
        self.init(Some(partial));
    }

    /// Parse `json` and initialize from it like `init_from_value`.
    pub fn init_from_json(&mut self, json: &str) -> Result<(), SessionError> {
        let payload: Value = serde_json::from_str(json)?;
        self.init_from_value(&payload);
        Ok(())
    }

    // === Decks ===

    /// Refill `white` and `black` with shuffled copies of the provider's
    /// pools, discarding whatever was left undealt. `ud` is untouched.
    pub fn reset_decks(&mut self) {
        let mut white = self.provider.white_cards();
        let mut black = self.provider.black_cards();
        self.shuffle_rng.shuffle(&mut white);
        self.shuffle_rng.shuffle(&mut black);

        tracing::info!(
            decks = ?self.provider.active_decks(),
            white = white.len(),
            black = black.len(),
            "decks reset"
        );

        self.state.decks.white = Vector::from(white);
        self.state.decks.black = Vector::from(black);
    }

    /// Deal one card from the named deck.
    pub fn deal_card(&mut self, category: &str) -> Result<String, SessionError> {
        self.deal_from(category.parse()?)
    }

    /// Remove and return one card from `category`.
    ///
    /// The card leaves the pool, so it can't come out again until the
    /// deck is reset.
    pub fn deal_from(&mut self, category: DeckCategory) -> Result<String, SessionError> {
        let pool = self.state.decks.get_mut(category);
        if pool.is_empty() {
            return Err(SessionError::EmptyDeck {
                category: category.name().to_owned(),
            });
        }
        let index = self.deal_rng.gen_range_usize(0..pool.len());
        Ok(pool.remove(index))
    }

    /// Undealt cards left in `category`.
    #[must_use]
    pub fn remaining(&self, category: DeckCategory) -> usize {
        self.state.decks.get(category).len()
    }

    /// Top up every active player's hand to `handsize` from `white`.
    ///
    /// Players are filled in `active_players` order, so when the deck runs
    /// out the earlier players end up with full hands. Returns the number
    /// of cards dealt.
    pub fn fix_hands(&mut self) -> usize {
        let players = self.state.active_players.clone();
        let target = self.state.handsize;
        let mut dealt = 0;

        for player in &players {
            let mut hand = self.state.hands.get(player).cloned().unwrap_or_default();
            let before = hand.len();
            while hand.len() < target {
                match self.deal_from(DeckCategory::White) {
                    Ok(card) => hand.push_back(card),
                    Err(_) => break,
                }
            }
            dealt += hand.len().saturating_sub(before);
            self.state.hands.insert(player.clone(), hand);
        }

        if dealt > 0 {
            tracing::debug!(dealt, remaining = self.state.decks.white.len(), "hands replenished");
        }
        if self.state.decks.white.is_empty() {
            let short = players
                .iter()
                .filter(|p| self.state.hands.get(*p).map_or(0, Vector::len) < target)
                .count();
            if short > 0 {
                tracing::warn!(short, "white deck exhausted before all hands were full");
            }
        }
        dealt
    }

    // === Answers ===

    /// Active players, excluding the czar, with no answer this round.
    #[must_use]
    pub fn who_hasnt_answered(&self) -> Vec<PlayerId> {
        let answered: FxHashSet<&str> = self
            .state
            .answers
            .iter()
            .map(|a| a.player().as_str())
            .collect();

        self.state
            .active_players
            .iter()
            .filter(|p| !self.state.is_czar(p.as_str()) && !answered.contains(p.as_str()))
            .cloned()
            .collect()
    }

    /// Whether `player` already has an answer this round.
    #[must_use]
    pub fn has_already_submitted(&self, player: &str) -> bool {
        self.state.answer_of(player).is_some()
    }

    /// Record `player`'s answer, moving the cards out of their hand.
    pub fn submit_answer<I>(&mut self, player: &str, cards: I) -> Result<(), SessionError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let id = PlayerId::from(player);
        if !self.state.is_active(player) {
            return Err(SessionError::NotActive { player: id });
        }
        if self.state.is_czar(player) {
            return Err(SessionError::CzarCannotAnswer { player: id });
        }
        if self.has_already_submitted(player) {
            return Err(SessionError::AlreadySubmitted { player: id });
        }

        let answer = Answer::new(id, cards);
        if answer.cards().is_empty() {
            return Err(SessionError::EmptyAnswer { player: answer.player().clone() });
        }
        let mut hand = self.state.hands.get(player).cloned().unwrap_or_default();
        for card in answer.cards() {
            match hand.index_of(card) {
                Some(index) => {
                    hand.remove(index);
                }
                None => {
                    return Err(SessionError::CardNotInHand {
                        player: answer.player().clone(),
                        card: card.clone(),
                    });
                }
            }
        }

        tracing::debug!(player, cards = answer.cards().len(), "answer submitted");
        self.state.hands.insert(answer.player().clone(), hand);
        self.state.answers.push_back(answer);
        Ok(())
    }

    // === Players and rounds ===

    /// Add a player to the table. Returns `false` if already active.
    pub fn join(&mut self, player: &str) -> bool {
        if self.state.is_active(player) {
            return false;
        }
        let id = PlayerId::from(player);
        if !self.state.hands.contains_key(player) {
            self.state.hands.insert(id.clone(), Vector::new());
        }
        if !self.state.scores.contains_key(player) {
            self.state.scores.insert(id.clone(), 0);
        }
        self.state.active_players.push_back(id);
        tracing::info!(player, players = self.state.active_players.len(), "player joined");
        true
    }

    /// Remove a player from the table. Their hand, score and answer are
    /// kept. If they were czar, the seat after theirs takes over.
    pub fn leave(&mut self, player: &str) -> bool {
        let Some(index) = self.state.active_players.iter().position(|p| p.as_str() == player) else {
            return false;
        };
        self.state.active_players.remove(index);

        if self.state.is_czar(player) {
            let len = self.state.active_players.len();
            self.state.czar = if len == 0 {
                None
            } else {
                self.state.active_players.get(index % len).cloned()
            };
            tracing::info!(czar = ?self.state.czar, "czar left, passing judgement on");
        }
        tracing::info!(player, players = self.state.active_players.len(), "player left");
        true
    }

    /// Pass the czar to the next active player, wrapping around.
    ///
    /// With no czar (or one who is no longer active) the first active
    /// player takes the seat.
    pub fn rotate_czar(&mut self) -> Option<&PlayerId> {
        let players = &self.state.active_players;
        let next = match &self.state.czar {
            _ if players.is_empty() => None,
            Some(czar) => match players.index_of(czar) {
                Some(index) => players.get((index + 1) % players.len()).cloned(),
                None => players.front().cloned(),
            },
            None => players.front().cloned(),
        };
        self.state.czar = next;
        self.state.czar.as_ref()
    }

    /// Begin a new round: clear answers, rotate the czar, deal a prompt and
    /// top up hands. Returns the new prompt.
    ///
    /// Nothing changes if there are too few players or no prompts left.
    pub fn start_round(&mut self) -> Result<String, SessionError> {
        let active = self.state.active_players.len();
        if active < self.config.min_players {
            return Err(SessionError::NotEnoughPlayers {
                active,
                required: self.config.min_players,
            });
        }
        let prompt = self.deal_from(DeckCategory::Black)?;

        self.state.answers.clear();
        self.state.winner = None;
        self.rotate_czar();
        self.state.prompt = Some(prompt.clone());
        self.state.round += 1;
        self.fix_hands();

        tracing::info!(round = self.state.round, czar = ?self.state.czar, "round started");
        Ok(prompt)
    }

    /// Award the round to `player`'s answer. Returns their new score.
    ///
    /// A round has one winner; later picks fail until `start_round`.
    pub fn pick_winner(&mut self, player: &str) -> Result<i64, SessionError> {
        if let Some(winner) = &self.state.winner {
            return Err(SessionError::RoundAlreadyJudged { winner: winner.clone() });
        }
        let Some(answer) = self.state.answer_of(player) else {
            return Err(SessionError::NoSuchAnswer { player: player.into() });
        };
        let id = answer.player().clone();
        let score = self.state.scores.get(player).copied().unwrap_or(0).saturating_add(1);
        self.state.scores.insert(id.clone(), score);
        self.state.winner = Some(id);
        tracing::info!(player, score, round = self.state.round, "round won");
        Ok(score)
    }

    // === Rankings ===

    /// Scores ranked highest first; equal scores ordered by name.
    #[must_use]
    pub fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        rank(&self.state.scores)
    }

    // === Snapshots ===

    /// O(1) copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Replace the current state with a snapshot.
    pub fn restore(&mut self, state: SessionState) {
        self.state = state;
    }

    /// State plus RNG positions.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.state.clone(),
            shuffle_rng: self.shuffle_rng.state(),
            deal_rng: self.deal_rng.state(),
        }
    }

    /// Resume from a checkpoint; later deals match the original session.
    pub fn resume(&mut self, checkpoint: Checkpoint) {
        self.shuffle_rng = GameRng::from_state(&checkpoint.shuffle_rng);
        self.deal_rng = GameRng::from_state(&checkpoint.deal_rng);
        self.state = checkpoint.state;
    }
}
