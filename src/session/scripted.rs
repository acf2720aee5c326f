//! Scripted controller with predetermined actions
//!
//! Drives a session from a fixed action list. Used by tests and by the CLI
//! `--script` flag for reproducible sessions.

use crate::session::controller::{SchemeAction, SessionController, SessionView};
use crate::session::snapshot::SessionSnapshot;
use crate::{ArchenemyError, Result};
use std::collections::VecDeque;

/// Controller that replays a fixed list of actions, then quits
pub struct ScriptedController {
    actions: VecDeque<SchemeAction>,
    resume_saved: bool,
}

impl ScriptedController {
    pub fn new(actions: Vec<SchemeAction>) -> Self {
        ScriptedController {
            actions: actions.into(),
            resume_saved: false,
        }
    }

    /// Whether a saved game should be resumed when offered
    pub fn with_resume(mut self, resume_saved: bool) -> Self {
        self.resume_saved = resume_saved;
        self
    }

    /// Parse a script like `"draw draw abandon:0 undo shuffle save end"`
    ///
    /// Actions may be separated by spaces or commas.
    pub fn parse(script: &str) -> Result<Self> {
        let mut actions = Vec::new();
        for word in script.split([' ', ',']).filter(|w| !w.is_empty()) {
            let action = match word {
                "draw" => SchemeAction::Draw,
                "undo" => SchemeAction::Undo,
                "shuffle" => SchemeAction::Shuffle,
                "save" => SchemeAction::Save,
                "end" => SchemeAction::EndGame,
                "quit" => SchemeAction::Quit,
                _ => {
                    let index = word.strip_prefix("abandon:").and_then(|n| n.parse().ok());
                    match index {
                        Some(index) => SchemeAction::Abandon(index),
                        None => {
                            return Err(ArchenemyError::InvalidArgument(format!(
                                "unknown script action '{word}'"
                            )))
                        }
                    }
                }
            };
            actions.push(action);
        }
        Ok(Self::new(actions))
    }
}

impl SessionController for ScriptedController {
    fn confirm_resume(&mut self, _snapshot: &SessionSnapshot) -> bool {
        self.resume_saved
    }

    fn choose_action(&mut self, _view: &SessionView<'_>) -> SchemeAction {
        self.actions.pop_front().unwrap_or(SchemeAction::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let mut controller =
            ScriptedController::parse("draw,draw abandon:1 undo shuffle save end").unwrap();

        let session = crate::session::Session::new();
        let view = SessionView::new(&session);
        assert_eq!(controller.choose_action(&view), SchemeAction::Draw);
        assert_eq!(controller.choose_action(&view), SchemeAction::Draw);
        assert_eq!(controller.choose_action(&view), SchemeAction::Abandon(1));
        assert_eq!(controller.choose_action(&view), SchemeAction::Undo);
        assert_eq!(controller.choose_action(&view), SchemeAction::Shuffle);
        assert_eq!(controller.choose_action(&view), SchemeAction::Save);
        assert_eq!(controller.choose_action(&view), SchemeAction::EndGame);
        // Exhausted scripts quit.
        assert_eq!(controller.choose_action(&view), SchemeAction::Quit);
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(ScriptedController::parse("draw fly").is_err());
        assert!(ScriptedController::parse("abandon:x").is_err());
    }
}
