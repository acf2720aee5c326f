//! Session runner
//!
//! Wires a controller's decisions to session transitions, persists the
//! session as play progresses, and handles the resume-on-start flow.
//! Transition failures are recoverable: they are reported through the
//! session logger and play continues.

use crate::session::controller::{SchemeAction, SessionController, SessionView};
use crate::session::snapshot::SessionSnapshot;
use crate::session::state::Session;
use crate::store::SnapshotStore;
use crate::Result;

/// Drives one session against a controller
pub struct SessionRunner<'a> {
    pub session: Session,
    store: &'a dyn SnapshotStore,
    autosave: bool,
}

impl<'a> SessionRunner<'a> {
    pub fn new(session: Session, store: &'a dyn SnapshotStore) -> Self {
        SessionRunner {
            session,
            store,
            autosave: true,
        }
    }

    /// Disable persisting after every mutating action
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Resume-on-start flow
    ///
    /// If a saved game exists the controller is asked whether to resume it.
    /// Accepting replaces the live session with the restored one; declining
    /// deletes the stale save. An unreadable save is reported and ignored
    /// rather than aborting the session. Returns whether a save was
    /// restored.
    pub fn offer_resume(&mut self, controller: &mut dyn SessionController) -> Result<bool> {
        let snapshot = match SessionSnapshot::load(self.store) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(e) => {
                self.session
                    .logger
                    .minimal(&format!("Ignoring unreadable saved game: {e}"));
                return Ok(false);
            }
        };

        if controller.confirm_resume(&snapshot) {
            let mut restored = snapshot.restore()?;
            // Carry over the live session's logger and RNG; neither is
            // persisted.
            restored.logger = self.session.logger.clone();
            restored.rng = self.session.rng.clone();
            self.session = restored;
            self.session.logger.minimal("Resumed saved game");
            Ok(true)
        } else {
            SessionSnapshot::clear(self.store)?;
            Ok(false)
        }
    }

    /// Run until the controller quits or ends the game
    pub fn run(&mut self, controller: &mut dyn SessionController) -> Result<()> {
        loop {
            let action = controller.choose_action(&SessionView::new(&self.session));

            let mutated = match action {
                SchemeAction::Draw => self.session.draw_scheme().map(|_| true),
                SchemeAction::Abandon(index) => {
                    self.session.abandon_scheme(index).map(|_| true)
                }
                SchemeAction::Undo => self.session.undo_last_draw().map(|_| true),
                SchemeAction::Shuffle => self.session.shuffle_pool().map(|_| true),
                SchemeAction::Save => {
                    match self.persist() {
                        Ok(()) => self.session.logger.minimal("Game saved"),
                        Err(e) => self
                            .session
                            .logger
                            .minimal(&format!("Could not save the game: {e}")),
                    }
                    Ok(false)
                }
                SchemeAction::EndGame => {
                    self.session.end_game();
                    if let Err(e) = SessionSnapshot::clear(self.store) {
                        self.session
                            .logger
                            .minimal(&format!("Could not remove the saved game: {e}"));
                    }
                    return Ok(());
                }
                SchemeAction::Quit => {
                    // Keep the save so the session can be resumed later.
                    if self.session.deck_selected || self.session.game_started {
                        self.autosave_now();
                    }
                    return Ok(());
                }
            };

            match mutated {
                Ok(true) if self.autosave => self.autosave_now(),
                Ok(_) => {}
                // Recoverable: report and keep playing.
                Err(e) => self.session.logger.minimal(&format!("{e}")),
            }
        }
    }

    /// Persist the current session under the default key
    pub fn persist(&self) -> Result<()> {
        SessionSnapshot::capture(&self.session)?.save(self.store)
    }

    fn autosave_now(&self) {
        match self.persist() {
            Ok(()) => self.session.logger.verbose("Saved game"),
            Err(e) => self
                .session
                .logger
                .minimal(&format!("Could not save the game: {e}")),
        }
    }
}
