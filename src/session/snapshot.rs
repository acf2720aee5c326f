//! Saved-game snapshots
//!
//! A snapshot is the only durable form of a session. It captures a
//! deliberate subset of the session: the started flag and the four card
//! places, with full card bodies embedded so a save is self-contained.
//! Deck-selection metadata and the ended flag are not persisted and come
//! back as defaults on restore.
//!
//! The wire format keeps the historical camelCase key names, with a version
//! tag for schema evolution:
//!
//! ```json
//! {
//!   "version": 1,
//!   "gameStarted": true,
//!   "cards": {
//!     "currentCard": { ... } | null,
//!     "previousCards": [ ... ],
//!     "ongoingCards": [ ... ],
//!     "cardPool": [ ... ]
//!   }
//! }
//! ```

use crate::core::SchemeCard;
use crate::session::state::Session;
use crate::store::SnapshotStore;
use crate::{ArchenemyError, Result};
use serde::{Deserialize, Serialize};

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Storage key for the saved game
pub const SNAPSHOT_KEY: &str = "archenemyGameState";

/// The persisted subset of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Schema version; pre-versioning saves deserialize as 0 and are
    /// rejected
    #[serde(default)]
    pub version: u32,

    pub game_started: bool,

    pub cards: SnapshotCards,
}

/// Full card bodies for each of the four places
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCards {
    pub current_card: Option<SchemeCard>,
    pub previous_cards: Vec<SchemeCard>,
    pub ongoing_cards: Vec<SchemeCard>,
    pub card_pool: Vec<SchemeCard>,
}

impl SessionSnapshot {
    /// Capture the persisted subset of a live session
    pub fn capture(session: &Session) -> Result<Self> {
        let resolve = |ids: &[crate::core::CardId]| -> Result<Vec<SchemeCard>> {
            ids.iter().map(|&id| session.card(id).cloned()).collect()
        };

        Ok(SessionSnapshot {
            version: SNAPSHOT_VERSION,
            game_started: session.game_started,
            cards: SnapshotCards {
                current_card: match session.current {
                    Some(id) => Some(session.card(id)?.clone()),
                    None => None,
                },
                previous_cards: resolve(&session.resolved.cards)?,
                ongoing_cards: resolve(&session.ongoing.cards)?,
                card_pool: resolve(&session.pool.cards)?,
            },
        })
    }

    /// Rebuild a session from this snapshot
    ///
    /// Non-persisted fields stay at their defaults: no deck is selected and
    /// the game is not ended. The session RNG is freshly seeded by the
    /// caller if determinism matters.
    pub fn restore(self) -> Result<Session> {
        self.validate()?;

        let mut session = Session::new();
        session.game_started = self.game_started;

        let SnapshotCards {
            current_card,
            previous_cards,
            ongoing_cards,
            card_pool,
        } = self.cards;

        fn install(session: &mut Session, card: SchemeCard) -> crate::core::CardId {
            let id = card.id;
            session.cards.insert(id, card);
            id
        }

        for card in card_pool {
            let id = install(&mut session, card);
            session.pool.add(id);
        }
        for card in ongoing_cards {
            let id = install(&mut session, card);
            session.ongoing.add(id);
        }
        for card in previous_cards {
            let id = install(&mut session, card);
            session.resolved.add(id);
        }
        if let Some(card) = current_card {
            let id = install(&mut session, card);
            session.current = Some(id);
        }

        Ok(session)
    }

    /// Persist this snapshot under the default key
    pub fn save(&self, store: &dyn SnapshotStore) -> Result<()> {
        let value = serde_json::to_value(self)
            .map_err(|e| ArchenemyError::SerializationError(e.to_string()))?;
        store.write(SNAPSHOT_KEY, &value)
    }

    /// Load the saved snapshot, if any
    pub fn load(store: &dyn SnapshotStore) -> Result<Option<Self>> {
        let Some(value) = store.read(SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        let snapshot: SessionSnapshot = serde_json::from_value(value)
            .map_err(|e| ArchenemyError::CorruptSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(Some(snapshot))
    }

    /// Delete the saved snapshot
    pub fn clear(store: &dyn SnapshotStore) -> Result<()> {
        store.remove(SNAPSHOT_KEY)
    }

    /// Total number of cards across the four places
    pub fn card_count(&self) -> usize {
        self.cards.card_pool.len()
            + self.cards.ongoing_cards.len()
            + self.cards.previous_cards.len()
            + usize::from(self.cards.current_card.is_some())
    }

    fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ArchenemyError::SnapshotVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        // The four places must not share a card instance.
        let mut ids: Vec<u32> = self
            .cards
            .card_pool
            .iter()
            .chain(&self.cards.ongoing_cards)
            .chain(&self.cards.previous_cards)
            .chain(self.cards.current_card.iter())
            .map(|c| c.id.as_u32())
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != total {
            return Err(ArchenemyError::CorruptSnapshot(
                "duplicate card ids across zones".to_string(),
            ));
        }
        Ok(())
    }
}
