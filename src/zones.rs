//! Session zones (card pool, ongoing schemes, resolved schemes)

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// Where a card can sit during a session
///
/// The scheme currently in motion is tracked separately on the session, not
/// as a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Cards not yet drawn
    Pool,
    /// Ongoing schemes still in play, in draw order
    Ongoing,
    /// Resolved or abandoned schemes, in resolution order
    Resolved,
}

/// An ordered zone of cards
///
/// Order is meaningful in every zone: the pool keeps deck order between
/// shuffles, ongoing keeps draw order, resolved keeps resolution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeZone {
    pub zone_type: Zone,
    pub cards: Vec<CardId>,
}

impl SchemeZone {
    pub fn new(zone_type: Zone) -> Self {
        SchemeZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    /// Remove the card at `index`, preserving the order of the rest
    ///
    /// This is a splice, not a swap-remove: relative order of the remaining
    /// cards is part of the observable session state.
    pub fn remove_at(&mut self, index: usize) -> Option<CardId> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove and return the most recently added card
    pub fn pop(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn get(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Fair in-place shuffle
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
