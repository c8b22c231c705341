//! In-memory deck provider.
//!
//! `CardLibrary` holds a set of named decks and an active selection.
//! Pools are the concatenation of the active decks in library order with
//! repeated texts dropped, so two decks sharing a card can't put the same
//! text into a session twice.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::provider::DeckProvider;
use crate::core::SessionError;

/// Card content of a single named deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDefinition {
    /// Response cards.
    #[serde(default)]
    pub white: Vec<String>,
    /// Prompt cards.
    #[serde(default)]
    pub black: Vec<String>,
}

impl DeckDefinition {
    /// Create a deck from response and prompt texts.
    pub fn new<W, B>(white: W, black: B) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            white: white.into_iter().map(Into::into).collect(),
            black: black.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
struct LibraryFile {
    #[serde(default)]
    decks: BTreeMap<String, DeckDefinition>,
}

/// In-memory `DeckProvider`.
///
/// ## Usage
///
/// ```
/// use czar_engine::decks::{CardLibrary, DeckDefinition, DeckProvider};
///
/// let mut library = CardLibrary::new()
///     .with_deck("main", DeckDefinition::new(["A Bop It"], ["_____? There's an app for that."]))
///     .with_deck("extra", DeckDefinition::new(["A Gypsy curse"], Vec::<String>::new()));
///
/// assert_eq!(library.active_decks(), vec!["main", "extra"]);
///
/// library.set_modes(&["extra".to_string()]);
/// assert_eq!(library.white_cards(), vec!["A Gypsy curse"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardLibrary {
    /// Decks in insertion order.
    decks: Vec<(String, DeckDefinition)>,

    /// Selected deck names. `None` selects every deck.
    active: Option<Vec<String>>,
}

impl CardLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deck (builder form).
    #[must_use]
    pub fn with_deck(mut self, name: impl Into<String>, deck: DeckDefinition) -> Self {
        self.add_deck(name, deck);
        self
    }

    /// Add or replace a deck. A replaced deck keeps its position.
    pub fn add_deck(&mut self, name: impl Into<String>, deck: DeckDefinition) {
        let name = name.into();
        match self.decks.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = deck,
            None => self.decks.push((name, deck)),
        }
    }

    /// Look up a deck by name.
    #[must_use]
    pub fn deck(&self, name: &str) -> Option<&DeckDefinition> {
        self.decks.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Load decks from JSON of the form
    /// `{"decks": {"name": {"white": [...], "black": [...]}}}`.
    ///
    /// Decks are added in name order.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let file: LibraryFile = serde_json::from_str(json)?;
        let mut library = Self::new();
        for (name, deck) in file.decks {
            library.add_deck(name, deck);
        }
        tracing::debug!(decks = library.decks.len(), "loaded card library");
        Ok(library)
    }

    fn is_active(&self, name: &str) -> bool {
        match &self.active {
            None => true,
            Some(active) => active.iter().any(|a| a == name),
        }
    }

    fn pool(&self, cards: impl Fn(&DeckDefinition) -> &[String]) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut pool = Vec::new();
        for (_, deck) in self.decks.iter().filter(|(name, _)| self.is_active(name)) {
            for card in cards(deck) {
                if seen.insert(card.as_str()) {
                    pool.push(card.clone());
                }
            }
        }
        pool
    }
}

impl DeckProvider for CardLibrary {
    fn available_decks(&self) -> Vec<String> {
        self.decks.iter().map(|(name, _)| name.clone()).collect()
    }

    fn active_decks(&self) -> Vec<String> {
        self.decks
            .iter()
            .map(|(name, _)| name)
            .filter(|name| self.is_active(name))
            .cloned()
            .collect()
    }

    fn set_modes(&mut self, modes: &[String]) {
        let mut selected = Vec::new();
        for mode in modes {
            if self.deck(mode).is_none() {
                tracing::warn!(mode = %mode, "ignoring unknown deck mode");
            } else if !selected.contains(mode) {
                selected.push(mode.clone());
            }
        }

        if selected.is_empty() {
            tracing::info!("no known deck modes selected, using every deck");
            self.active = None;
        } else {
            tracing::info!(decks = ?selected, "deck modes set");
            self.active = Some(selected);
        }
    }

    fn white_cards(&self) -> Vec<String> {
        self.pool(|deck| deck.white.as_slice())
    }

    fn black_cards(&self) -> Vec<String> {
        self.pool(|deck| deck.black.as_slice())
    }
}
