//! Scheme deck types and ownership metadata

use crate::core::SchemeCard;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository-assigned deck identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(u32);

impl DeckId {
    pub fn new(id: u32) -> Self {
        DeckId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered collection of scheme cards
///
/// Decks are loaded in full when a session selects them; the session never
/// mutates the source deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub description: Option<String>,

    /// Owning user
    pub owner: String,

    /// Visible to other users when browsing
    pub public: bool,

    /// Hidden from the owner's deck list without being deleted
    pub archived: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// The scheme cards, in deck order
    pub cards: Vec<SchemeCard>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Creation payload for a deck; the repository assigns id, owner, and
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeck {
    pub name: String,
    pub description: Option<String>,
    pub cards: Vec<SchemeCard>,
}
