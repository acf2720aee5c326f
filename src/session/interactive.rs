//! Interactive controller for human players
//!
//! Reads table actions from stdin and displays the session using
//! SessionView.

use crate::session::controller::{SchemeAction, SessionController, SessionView};
use crate::session::snapshot::SessionSnapshot;
use std::io::{self, Write};

/// A controller that prompts a human player via stdin
pub struct InteractiveController;

impl InteractiveController {
    pub fn new() -> Self {
        InteractiveController
    }

    /// Prompt until the player answers yes or no
    fn get_yes_no(&self, prompt: &str) -> bool {
        loop {
            print!("{prompt} [y/n] ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("Error reading input");
                continue;
            }
            match input.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => eprintln!("Please answer 'y' or 'n'."),
            }
        }
    }

    fn display_table(&self, view: &SessionView<'_>) {
        println!();
        match view.current_scheme() {
            Some(card) => {
                println!("Current scheme: {} [{}]", card.name, card.type_line);
                if !card.text.is_empty() {
                    println!("  {}", card.text);
                }
            }
            None => println!("No scheme in motion."),
        }

        let ongoing = view.ongoing_schemes();
        if ongoing.is_empty() {
            println!("Ongoing schemes: none");
        } else {
            println!("Ongoing schemes:");
            for (index, card) in ongoing.iter().enumerate() {
                println!("  [{index}] {}", card.name);
            }
        }
        println!(
            "Pool: {} | Resolved: {}",
            view.pool_size(),
            view.resolved_size()
        );
    }

    fn display_help(&self) {
        println!("\n=== Help ===");
        println!("  d          - Draw the next scheme");
        println!("  a <n>      - Abandon ongoing scheme n");
        println!("  u          - Undo the last draw");
        println!("  s          - Shuffle the scheme pool");
        println!("  w          - Save the game");
        println!("  e          - End the game (discards the save)");
        println!("  q          - Quit (keeps the save for next time)");
        println!("  ?          - Show this help");
        println!();
    }
}

impl Default for InteractiveController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController for InteractiveController {
    fn confirm_resume(&mut self, snapshot: &SessionSnapshot) -> bool {
        println!(
            "Found a saved game ({} cards in play).",
            snapshot.card_count()
        );
        self.get_yes_no("Resume it?")
    }

    fn choose_action(&mut self, view: &SessionView<'_>) -> SchemeAction {
        self.display_table(view);

        loop {
            print!("> ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("Error reading input");
                continue;
            }
            let trimmed = input.trim().to_lowercase();
            let mut words = trimmed.split_whitespace();

            match words.next() {
                Some("d") | Some("draw") => return SchemeAction::Draw,
                Some("a") | Some("abandon") => match words.next().and_then(|n| n.parse().ok()) {
                    Some(index) => return SchemeAction::Abandon(index),
                    None => eprintln!("Usage: a <index> (see the ongoing list)"),
                },
                Some("u") | Some("undo") => return SchemeAction::Undo,
                Some("s") | Some("shuffle") => return SchemeAction::Shuffle,
                Some("w") | Some("save") => return SchemeAction::Save,
                Some("e") | Some("end") => {
                    if self.get_yes_no("End the game and discard the save?") {
                        return SchemeAction::EndGame;
                    }
                }
                Some("q") | Some("quit") => return SchemeAction::Quit,
                Some("?") | Some("help") => self.display_help(),
                _ => eprintln!("Unknown command (enter '?' for help)."),
            }
        }
    }
}
