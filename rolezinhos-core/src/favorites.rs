//! Favorited record ids, persisted independently of the records.

use std::collections::HashSet;

use crate::error::{RolezinhosError, RolezinhosResult};
use crate::id::RecordId;
use crate::storage::Storage;

pub const FAVORITES_KEY: &str = "rolezinhos.favoritos";

pub struct FavoritesSet<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> FavoritesSet<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        FavoritesSet {
            storage,
            key: key.to_string(),
        }
    }

    /// Current favorites in the order they were added.
    pub fn list(&self) -> RolezinhosResult<Vec<RecordId>> {
        let Some(content) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<RecordId>>(&content) {
            Ok(mut ids) => {
                let mut seen = HashSet::new();
                ids.retain(|id| seen.insert(id.clone()));
                Ok(ids)
            }
            Err(e) => {
                let err = RolezinhosError::CorruptLocalState {
                    key: self.key.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %err, "discarding favorites");
                self.storage.remove(&self.key)?;
                Ok(Vec::new())
            }
        }
    }

    pub fn is_favorite(&self, id: &RecordId) -> RolezinhosResult<bool> {
        Ok(self.list()?.contains(id))
    }

    /// Flip membership of `id` and persist. Returns true if `id` is now a favorite.
    pub fn toggle(&self, id: &RecordId) -> RolezinhosResult<bool> {
        let mut ids = self.list()?;

        let now_favorite = match ids.iter().position(|f| f == id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(id.clone());
                true
            }
        };

        let content = serde_json::to_string(&ids)?;
        self.storage.set(&self.key, &content)?;
        Ok(now_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn toggle_twice_restores_membership() {
        let storage = MemoryStorage::new();
        let favorites = FavoritesSet::new(&storage);
        let id = RecordId::from("3");

        assert!(!favorites.is_favorite(&id).unwrap());
        assert!(favorites.toggle(&id).unwrap());
        assert!(favorites.is_favorite(&id).unwrap());
        assert!(!favorites.toggle(&id).unwrap());
        assert!(!favorites.is_favorite(&id).unwrap());
    }

    #[test]
    fn numeric_ids_in_storage_match_string_queries() {
        let storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, r#"[1, "2"]"#).unwrap();
        let favorites = FavoritesSet::new(&storage);

        assert!(favorites.is_favorite(&RecordId::from("1")).unwrap());
        assert!(favorites.is_favorite(&RecordId::from(2)).unwrap());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let storage = MemoryStorage::new();
        let favorites = FavoritesSet::new(&storage);

        for id in ["9", "1", "5"] {
            favorites.toggle(&RecordId::from(id)).unwrap();
        }

        let listed: Vec<_> = favorites
            .list()
            .unwrap()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(listed, vec!["9", "1", "5"]);
    }

    #[test]
    fn corrupt_blob_reads_as_empty_and_is_cleared() {
        let storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, "{oops").unwrap();
        let favorites = FavoritesSet::new(&storage);

        assert!(favorites.list().unwrap().is_empty());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap(), None);

        assert!(favorites.toggle(&RecordId::from(1)).unwrap());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["1"]"#));
    }
}
