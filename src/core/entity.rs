//! Card identity and storage

use crate::ArchenemyError;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for scheme cards
///
/// IDs are contiguous and stable for the lifetime of a session; cards are
/// never deallocated while the session that owns them is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Central storage for the cards of one session
///
/// Provides fast lookup by CardId. Uses FxHashMap for fast hashing of
/// integer keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T> {
    entities: FxHashMap<CardId, T>,
    next_id: u32,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Generate a new unique CardId
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an entity with a specific ID
    ///
    /// Keeps the ID generator ahead of any explicitly inserted ID so that
    /// snapshot restore cannot hand out a duplicate.
    pub fn insert(&mut self, id: CardId, entity: T) {
        if id.as_u32() >= self.next_id {
            self.next_id = id.as_u32() + 1;
        }
        self.entities.insert(id, entity);
    }

    /// Get an entity by ID
    pub fn get(&self, id: CardId) -> Result<&T> {
        self.entities
            .get(&id)
            .ok_or_else(|| ArchenemyError::InvalidArgument(format!("no card with id {id}")))
    }

    /// Check if an entity exists
    pub fn contains(&self, id: CardId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &T)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop all entities and reset the ID generator
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 0;
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_store() {
        let mut store = EntityStore::new();
        let id1 = store.next_id();
        let id2 = store.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);

        store.insert(id1, "Behold the Power of Destruction".to_string());
        store.insert(id2, "All in Good Time".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id1).unwrap(), "Behold the Power of Destruction");
        assert!(store.get(CardId::new(999)).is_err());
    }

    #[test]
    fn test_insert_advances_id_generator() {
        let mut store = EntityStore::new();
        store.insert(CardId::new(7), "x".to_string());
        assert_eq!(store.next_id().as_u32(), 8);
    }

    #[test]
    fn test_clear() {
        let mut store = EntityStore::new();
        let id = store.next_id();
        store.insert(id, 1u8);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.next_id().as_u32(), 0);
    }
}
