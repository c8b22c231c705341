//! Deck provider trait.
//!
//! The session engine never owns card content. It asks a `DeckProvider`
//! for the full response and prompt pools of whatever decks are currently
//! selected, then deals from its own copies.

/// Source of card text and deck selection.
///
/// ## Implementation Notes
///
/// - `white_cards`/`black_cards` must reflect the current `active_decks`
/// - The pools are read-only from the engine's point of view; the engine
///   calls them only from `GameSession::reset_decks`
/// - `set_modes` is the only side-effecting call
pub trait DeckProvider {
    /// Every deck identifier this provider knows about.
    fn available_decks(&self) -> Vec<String>;

    /// Deck identifiers currently selected for play.
    fn active_decks(&self) -> Vec<String>;

    /// Configure provider-side deck selection.
    fn set_modes(&mut self, modes: &[String]);

    /// Full pool of response cards for the active decks.
    fn white_cards(&self) -> Vec<String>;

    /// Full pool of prompt cards for the active decks.
    fn black_cards(&self) -> Vec<String>;
}

impl<P: DeckProvider + ?Sized> DeckProvider for Box<P> {
    fn available_decks(&self) -> Vec<String> {
        (**self).available_decks()
    }

    fn active_decks(&self) -> Vec<String> {
        (**self).active_decks()
    }

    fn set_modes(&mut self, modes: &[String]) {
        (**self).set_modes(modes)
    }

    fn white_cards(&self) -> Vec<String> {
        (**self).white_cards()
    }

    fn black_cards(&self) -> Vec<String> {
        (**self).black_cards()
    }
}
