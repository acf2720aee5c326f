//! Loading scheme card definitions and deck-list files

pub mod database;
pub mod deck;

pub use database::{SchemeDatabase, SchemeDefinition};
pub use deck::{DeckEntry, DeckList, DeckListLoader};
