//! Decks: bucket names and the provider that supplies card content.
//!
//! ## Key Types
//!
//! - `DeckCategory`: Name of an undealt pool (`white`, `black` or `ud`)
//! - `DeckProvider`: Capability the engine uses to refill pools
//! - `CardLibrary`: In-memory provider with named decks and a mode selection

pub mod category;
pub mod provider;
pub mod library;

pub use category::DeckCategory;
pub use provider::DeckProvider;
pub use library::{CardLibrary, DeckDefinition};
