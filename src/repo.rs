//! Deck repository
//!
//! CRUD over stored scheme decks. The session state machine never touches
//! the repository; the orchestration layer fetches the deck list up front
//! and hands it over already resolved.

use crate::core::{Deck, DeckId, NewDeck};
use crate::{ArchenemyError, Result};
use async_trait::async_trait;
use jiff::Timestamp;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Storage backend for scheme decks
#[async_trait]
pub trait DeckRepository {
    /// Decks owned by the current user, excluding archived ones, in id
    /// order
    async fn list_decks_for_current_user(&self) -> Result<Vec<Deck>>;

    /// Create a deck; the repository assigns id, owner, and timestamps
    async fn save_deck(&self, new_deck: NewDeck) -> Result<Deck>;

    /// Delete a deck owned by the current user
    async fn delete_deck(&self, id: DeckId) -> Result<()>;
}

/// File-backed repository: one JSON file per deck under a root directory
///
/// ```text
/// <root>/
///   deck-1.json
///   deck-2.json
/// ```
pub struct FileDeckRepository {
    root: PathBuf,
    current_user: String,
}

impl FileDeckRepository {
    /// Open (or create) a repository rooted at the given directory
    pub fn new(root: impl Into<PathBuf>, current_user: impl Into<String>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(FileDeckRepository {
            root,
            current_user: current_user.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn deck_path(&self, id: DeckId) -> PathBuf {
        self.root.join(format!("deck-{id}.json"))
    }

    async fn load_all(&self) -> Result<Vec<Deck>> {
        let mut decks = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with("deck-") || !name.ends_with(".json") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            let deck: Deck = serde_json::from_str(&content).map_err(|e| {
                ArchenemyError::InvalidDeckFormat(format!("{}: {e}", path.display()))
            })?;
            decks.push(deck);
        }
        decks.sort_by_key(|d| d.id.as_u32());
        Ok(decks)
    }

    async fn load_deck(&self, id: DeckId) -> Result<Deck> {
        let path = self.deck_path(id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArchenemyError::DeckNotFound(id.as_u32()))
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|e| ArchenemyError::InvalidDeckFormat(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl DeckRepository for FileDeckRepository {
    async fn list_decks_for_current_user(&self) -> Result<Vec<Deck>> {
        let decks = self.load_all().await?;
        Ok(decks
            .into_iter()
            .filter(|d| d.owner == self.current_user && !d.archived)
            .collect())
    }

    async fn save_deck(&self, new_deck: NewDeck) -> Result<Deck> {
        let existing = self.load_all().await?;
        let next_id = existing
            .iter()
            .map(|d| d.id.as_u32())
            .max()
            .map_or(1, |max| max + 1);

        let now = Timestamp::now();
        let deck = Deck {
            id: DeckId::new(next_id),
            name: new_deck.name,
            description: new_deck.description,
            owner: self.current_user.clone(),
            public: false,
            archived: false,
            created_at: now,
            updated_at: now,
            cards: new_deck.cards,
        };

        let json = serde_json::to_string_pretty(&deck)
            .map_err(|e| ArchenemyError::SerializationError(e.to_string()))?;
        fs::write(self.deck_path(deck.id), json).await?;
        Ok(deck)
    }

    async fn delete_deck(&self, id: DeckId) -> Result<()> {
        let deck = self.load_deck(id).await?;
        if deck.owner != self.current_user {
            return Err(ArchenemyError::Unauthorized(id.as_u32()));
        }
        fs::remove_file(self.deck_path(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, SchemeCard};

    fn new_deck(name: &str) -> NewDeck {
        NewDeck {
            name: name.to_string(),
            description: Some("test deck".to_string()),
            cards: vec![SchemeCard::new(
                CardId::new(0),
                "Ignite the Cloneforge!".to_string(),
                "Scheme".to_string(),
            )],
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileDeckRepository::new(dir.path(), "nicol").unwrap();

        let first = repo.save_deck(new_deck("first")).await.unwrap();
        let second = repo.save_deck(new_deck("second")).await.unwrap();

        assert_eq!(first.id.as_u32(), 1);
        assert_eq!(second.id.as_u32(), 2);
        assert_eq!(first.owner, "nicol");
    }

    #[tokio::test]
    async fn test_list_scopes_to_current_user() {
        let dir = tempfile::tempdir().unwrap();
        let mine = FileDeckRepository::new(dir.path(), "nicol").unwrap();
        let theirs = FileDeckRepository::new(dir.path(), "urza").unwrap();

        mine.save_deck(new_deck("mine")).await.unwrap();
        theirs.save_deck(new_deck("theirs")).await.unwrap();

        let listed = mine.list_decks_for_current_user().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "mine");
    }

    #[tokio::test]
    async fn test_delete_unknown_deck() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileDeckRepository::new(dir.path(), "nicol").unwrap();

        assert!(matches!(
            repo.delete_deck(DeckId::new(9)).await,
            Err(ArchenemyError::DeckNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let dir = tempfile::tempdir().unwrap();
        let mine = FileDeckRepository::new(dir.path(), "nicol").unwrap();
        let theirs = FileDeckRepository::new(dir.path(), "urza").unwrap();

        let deck = theirs.save_deck(new_deck("theirs")).await.unwrap();
        assert!(matches!(
            mine.delete_deck(deck.id).await,
            Err(ArchenemyError::Unauthorized(_))
        ));

        theirs.delete_deck(deck.id).await.unwrap();
        assert!(theirs.list_decks_for_current_user().await.unwrap().is_empty());
    }
}
