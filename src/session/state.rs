//! The Archenemy session state machine
//!
//! A session owns every card of the selected deck and moves them between
//! four places: the undrawn pool, the scheme currently in motion, the
//! ongoing schemes still in play, and the resolved pile. The four are
//! mutually exclusive and together always hold exactly the selected deck's
//! cards.

use crate::core::{CardId, Deck, DeckId, EntityStore, SchemeCard};
use crate::session::logger::SessionLogger;
use crate::zones::{SchemeZone, Zone};
use crate::{ArchenemyError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::cell::RefCell;

/// One Archenemy play session
///
/// Transitions are synchronous and run to completion; the session is owned
/// by a single runner and never shared across threads.
#[derive(Debug)]
pub struct Session {
    /// Coarse phase flags
    pub game_started: bool,
    pub game_ended: bool,
    pub deck_selected: bool,

    /// Which deck backs this session
    pub selected_deck: Option<DeckId>,

    /// Every card of the selected deck
    pub cards: EntityStore<SchemeCard>,

    /// Cards not yet drawn
    pub pool: SchemeZone,

    /// The scheme currently in motion
    pub current: Option<CardId>,

    /// Ongoing schemes still in play, in draw order
    pub ongoing: SchemeZone,

    /// Resolved or abandoned schemes, in resolution order
    pub resolved: SchemeZone,

    /// Session RNG for draws and shuffles (serializable, seedable for
    /// deterministic replay)
    ///
    /// Wrapped in RefCell so draws can pick an index while the session is
    /// otherwise borrowed immutably by views.
    pub rng: RefCell<ChaCha12Rng>,

    /// Centralized logger for session events
    pub logger: SessionLogger,
}

impl Session {
    pub fn new() -> Self {
        Session {
            game_started: false,
            game_ended: false,
            deck_selected: false,
            selected_deck: None,
            cards: EntityStore::new(),
            pool: SchemeZone::new(Zone::Pool),
            current: None,
            ongoing: SchemeZone::new(Zone::Ongoing),
            resolved: SchemeZone::new(Zone::Resolved),
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)),
            logger: SessionLogger::new(),
        }
    }

    /// Create a session with a specific RNG seed for reproducible play
    pub fn with_seed(seed: u64) -> Self {
        let mut session = Self::new();
        session.seed_rng(seed);
        session
    }

    /// Reseed the session RNG
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Whether draw/undo/shuffle/abandon are currently meaningful
    pub fn in_progress(&self) -> bool {
        self.game_started && !self.game_ended
    }

    /// Look up a card owned by this session
    pub fn card(&self, id: CardId) -> Result<&SchemeCard> {
        self.cards.get(id)
    }

    /// Back this session with a deck from the caller-supplied list
    ///
    /// Replaces the pool with a full copy of the deck's cards (in deck
    /// order) and empties the other three places. An unknown id leaves the
    /// session untouched.
    pub fn select_deck(&mut self, deck_id: DeckId, decks: &[Deck]) -> Result<()> {
        let deck = decks
            .iter()
            .find(|d| d.id == deck_id)
            .ok_or(ArchenemyError::DeckNotFound(deck_id.as_u32()))?;

        self.cards.clear();
        self.pool.clear();
        self.ongoing.clear();
        self.resolved.clear();
        self.current = None;

        // Cards get fresh session-local instance ids; decks may run
        // duplicates of the same printing.
        for card in &deck.cards {
            let id = self.cards.next_id();
            let mut instance = card.clone();
            instance.id = id;
            self.cards.insert(id, instance);
            self.pool.add(id);
        }

        self.deck_selected = true;
        self.selected_deck = Some(deck_id);
        // A non-empty pool under an ended flag would break the ended-state
        // invariant; selecting a deck re-enters the pre-game phase.
        self.game_ended = false;

        self.logger.normal(&format!(
            "Selected deck '{}' ({} schemes)",
            deck.name,
            self.pool.len()
        ));
        Ok(())
    }

    /// Begin play
    ///
    /// Requires a selected deck; starting with an empty session would only
    /// produce dead draws.
    pub fn start_game(&mut self) -> Result<()> {
        if !self.deck_selected {
            return Err(ArchenemyError::InvalidAction(
                "cannot start a game before selecting a deck".to_string(),
            ));
        }
        self.game_started = true;
        self.game_ended = false;
        self.logger.minimal("Game started");
        Ok(())
    }

    /// Draw the next scheme
    ///
    /// Removes a uniformly random card from the pool and puts it in motion.
    /// The scheme it displaces moves to the ongoing pile if it is an
    /// ongoing scheme, otherwise to the resolved pile. An empty pool is not
    /// an error: the draw is a complete no-op and returns `None`.
    pub fn draw_scheme(&mut self) -> Result<Option<CardId>> {
        self.ensure_in_progress("draw a scheme")?;

        if self.pool.is_empty() {
            self.logger.normal("The scheme pool is empty");
            return Ok(None);
        }

        let index = self.rng.borrow_mut().gen_range(0..self.pool.len());
        let drawn = match self.pool.remove_at(index) {
            Some(id) => id,
            None => return Ok(None),
        };

        if let Some(prev) = self.current.take() {
            if self.card(prev)?.is_ongoing() {
                self.ongoing.add(prev);
            } else {
                self.resolved.add(prev);
            }
        }
        self.current = Some(drawn);

        self.logger
            .minimal(&format!("Drew scheme: {}", self.card(drawn)?.name));
        self.logger
            .normal(&format!("{} schemes left in the pool", self.pool.len()));
        Ok(Some(drawn))
    }

    /// Abandon the ongoing scheme at `index`
    ///
    /// Moves it to the resolved pile. Abandoned schemes are out of reach of
    /// undo.
    pub fn abandon_scheme(&mut self, index: usize) -> Result<CardId> {
        self.ensure_in_progress("abandon a scheme")?;

        let id = self
            .ongoing
            .remove_at(index)
            .ok_or_else(|| {
                ArchenemyError::InvalidArgument(format!(
                    "no ongoing scheme at index {index} ({} in play)",
                    self.ongoing.len()
                ))
            })?;
        self.resolved.add(id);

        self.logger
            .minimal(&format!("Abandoned scheme: {}", self.card(id)?.name));
        Ok(id)
    }

    /// Undo the most recent draw
    ///
    /// The tail of the resolved pile becomes the scheme in motion again and
    /// the displaced current card returns to the pool. Repeated calls walk
    /// the resolved pile backward one draw at a time. Ongoing schemes are
    /// never reached. Returns the restored card, or `None` if there is
    /// nothing to undo.
    pub fn undo_last_draw(&mut self) -> Result<Option<CardId>> {
        self.ensure_in_progress("undo a draw")?;

        let restored = match self.resolved.pop() {
            Some(id) => id,
            None => return Ok(None),
        };
        if let Some(displaced) = self.current.replace(restored) {
            self.pool.add(displaced);
        }

        self.logger
            .minimal(&format!("Undid draw, back to: {}", self.card(restored)?.name));
        Ok(Some(restored))
    }

    /// Shuffle the undrawn pool in place
    ///
    /// The other three places are untouched.
    pub fn shuffle_pool(&mut self) -> Result<()> {
        self.ensure_in_progress("shuffle the pool")?;
        self.pool.shuffle(&mut *self.rng.borrow_mut());
        self.logger.normal("Shuffled the scheme pool");
        Ok(())
    }

    /// End the game and reset the session
    ///
    /// Hard reset: no record of the finished game's card history is kept.
    /// Callable from any state.
    pub fn end_game(&mut self) {
        self.game_started = false;
        self.game_ended = true;
        self.deck_selected = false;
        self.selected_deck = None;
        self.current = None;
        self.pool.clear();
        self.ongoing.clear();
        self.resolved.clear();
        self.cards.clear();
        self.logger.minimal("Game ended");
    }

    /// Every card id the session currently references, across all four
    /// places
    pub fn all_card_ids(&self) -> Vec<CardId> {
        let mut ids = Vec::with_capacity(self.cards.len());
        ids.extend(&self.pool.cards);
        ids.extend(self.current);
        ids.extend(&self.ongoing.cards);
        ids.extend(&self.resolved.cards);
        ids
    }

    fn ensure_in_progress(&self, op: &str) -> Result<()> {
        if self.in_progress() {
            Ok(())
        } else {
            Err(ArchenemyError::InvalidAction(format!(
                "cannot {op}: no game in progress"
            )))
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
