//! Scheme card database
//!
//! Card definitions live in one JSON file (an array of printings). The
//! database loads it eagerly and indexes definitions by normalized name so
//! deck lists can reference cards loosely ("Behold the power of
//! destruction" finds "Behold the Power of Destruction!").

use crate::core::{CardId, SchemeCard};
use crate::{ArchenemyError, Result};
use deunicode::deunicode;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path;
use tokio::fs;

/// One scheme printing as stored in the database file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeDefinition {
    pub name: String,
    pub type_line: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: SmallVec<[String; 2]>,
}

impl SchemeDefinition {
    /// Create a playable card instance from this printing
    pub fn instantiate(&self, id: CardId) -> SchemeCard {
        SchemeCard {
            id,
            name: self.name.clone(),
            type_line: self.type_line.clone(),
            text: self.text.clone(),
            images: self.images.clone(),
        }
    }
}

/// Normalize a card name for lookup: ASCII-fold, lowercase, strip
/// punctuation that printings are inconsistent about
fn normalize_name(name: &str) -> String {
    deunicode(name)
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | ',' | ':' | '!' | '?' | '.'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// In-memory database of scheme printings, indexed by normalized name
pub struct SchemeDatabase {
    definitions: Vec<SchemeDefinition>,
    by_name: FxHashMap<String, usize>,
}

impl SchemeDatabase {
    /// Build a database from already-parsed definitions
    pub fn from_definitions(definitions: Vec<SchemeDefinition>) -> Self {
        let mut by_name = FxHashMap::default();
        for (idx, def) in definitions.iter().enumerate() {
            by_name.insert(normalize_name(&def.name), idx);
        }
        SchemeDatabase {
            definitions,
            by_name,
        }
    }

    /// Eagerly load the database from a JSON file
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let definitions: Vec<SchemeDefinition> = serde_json::from_str(&content)
            .map_err(|e| {
                ArchenemyError::InvalidCardFormat(format!("{}: {e}", path.display()))
            })?;
        Ok(Self::from_definitions(definitions))
    }

    /// Look up a printing by (loosely matched) name
    pub fn get(&self, name: &str) -> Option<&SchemeDefinition> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&idx| &self.definitions[idx])
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All printings, in file order
    pub fn definitions(&self) -> &[SchemeDefinition] {
        &self.definitions
    }
}
