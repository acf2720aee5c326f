//! Controller interface between the session and a player
//!
//! The runner calls the controller when a decision is needed; the
//! controller inspects a read-only view of the session to make it.

use crate::core::SchemeCard;
use crate::session::snapshot::SessionSnapshot;
use crate::session::state::Session;

/// Table actions a player can take during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeAction {
    /// Draw the next scheme from the pool
    Draw,

    /// Abandon the ongoing scheme at this index
    Abandon(usize),

    /// Undo the most recent draw
    Undo,

    /// Shuffle the undrawn pool
    Shuffle,

    /// Persist the session now
    Save,

    /// End the game and discard the saved session
    EndGame,

    /// Leave the table, keeping the saved session for later
    Quit,
}

/// Read-only view of a session for controllers
pub struct SessionView<'a> {
    session: &'a Session,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a Session) -> Self {
        SessionView { session }
    }

    /// The scheme currently in motion
    pub fn current_scheme(&self) -> Option<&SchemeCard> {
        self.session
            .current
            .and_then(|id| self.session.card(id).ok())
    }

    /// Ongoing schemes in draw order
    pub fn ongoing_schemes(&self) -> Vec<&SchemeCard> {
        self.session
            .ongoing
            .cards
            .iter()
            .filter_map(|&id| self.session.card(id).ok())
            .collect()
    }

    pub fn pool_size(&self) -> usize {
        self.session.pool.len()
    }

    pub fn resolved_size(&self) -> usize {
        self.session.resolved.len()
    }

    pub fn in_progress(&self) -> bool {
        self.session.in_progress()
    }

    /// Whether undo currently has anything to walk back
    pub fn can_undo(&self) -> bool {
        !self.session.resolved.is_empty()
    }
}

/// A decision-maker for one session
pub trait SessionController {
    /// Asked once at startup when a saved game exists; `true` resumes it,
    /// `false` discards it
    fn confirm_resume(&mut self, snapshot: &SessionSnapshot) -> bool;

    /// Choose the next table action
    fn choose_action(&mut self, view: &SessionView<'_>) -> SchemeAction;
}
