//! Deck-list file loader
//!
//! Plain-text deck lists:
//!
//! ```text
//! [metadata]
//! Name=March of the Machines
//! Description=Artifact beatdown
//!
//! [Schemes]
//! 2 The Very Soil Shall Shake
//! 1 All in Good Time
//! ```

use crate::core::{CardId, SchemeCard};
use crate::loader::SchemeDatabase;
use crate::{ArchenemyError, Result};
use std::path::Path;

/// Deck-list loader
pub struct DeckListLoader;

impl DeckListLoader {
    /// Load a deck list from a file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck list from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut description = None;
        let mut entries = Vec::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            if let Some(value) = line.strip_prefix("Name=") {
                name = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = line.strip_prefix("Description=") {
                description = Some(value.trim().to_string());
                continue;
            }

            // Format: "2 Card Name"
            let Some((count_str, rest)) = line.split_once(' ') else {
                return Err(ArchenemyError::InvalidDeckFormat(format!(
                    "expected '<count> <card name>', got '{line}'"
                )));
            };
            let count: u8 = count_str.parse().map_err(|_| {
                ArchenemyError::InvalidDeckFormat(format!("invalid count in '{line}'"))
            })?;
            if count == 0 {
                return Err(ArchenemyError::InvalidDeckFormat(format!(
                    "zero count in '{line}'"
                )));
            }
            entries.push(DeckEntry {
                card_name: rest.trim().to_string(),
                count,
            });
        }

        if entries.is_empty() {
            return Err(ArchenemyError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList {
            name,
            description,
            entries,
        })
    }
}

/// A deck-list entry (card name and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// A parsed deck list, not yet resolved against the card database
#[derive(Debug, Clone)]
pub struct DeckList {
    pub name: Option<String>,
    pub description: Option<String>,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Resolve every entry against the database, producing one card
    /// instance per copy
    pub fn resolve(&self, db: &SchemeDatabase) -> Result<Vec<SchemeCard>> {
        let mut cards = Vec::with_capacity(self.total_cards());
        let mut next_id = 0u32;
        for entry in &self.entries {
            let def = db
                .get(&entry.card_name)
                .ok_or_else(|| ArchenemyError::CardNotFound(entry.card_name.clone()))?;
            for _ in 0..entry.count {
                cards.push(def.instantiate(CardId::new(next_id)));
                next_id += 1;
            }
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SchemeDefinition;
    use smallvec::SmallVec;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
[metadata]
Name=Test Deck
Description=Just testing

[Schemes]
2 The Very Soil Shall Shake
1 All in Good Time
"#;

        let deck = DeckListLoader::parse(content).unwrap();
        assert_eq!(deck.name.as_deref(), Some("Test Deck"));
        assert_eq!(deck.description.as_deref(), Some("Just testing"));
        assert_eq!(deck.entries.len(), 2);
        assert_eq!(deck.total_cards(), 3);

        assert_eq!(deck.entries[0].card_name, "The Very Soil Shall Shake");
        assert_eq!(deck.entries[0].count, 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DeckListLoader::parse("").is_err());
        assert!(DeckListLoader::parse("one Card Name").is_err());
        assert!(DeckListLoader::parse("0 Card Name").is_err());
    }

    #[test]
    fn test_resolve_against_database() {
        let db = SchemeDatabase::from_definitions(vec![SchemeDefinition {
            name: "All in Good Time".to_string(),
            type_line: "Scheme".to_string(),
            text: String::new(),
            images: SmallVec::new(),
        }]);

        let deck = DeckListLoader::parse("2 All in Good Time").unwrap();
        let cards = deck.resolve(&db).unwrap();
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].id, cards[1].id);
        assert_eq!(cards[0].name, "All in Good Time");

        let missing = DeckListLoader::parse("1 No Such Scheme").unwrap();
        assert!(matches!(
            missing.resolve(&db),
            Err(ArchenemyError::CardNotFound(_))
        ));
    }
}
