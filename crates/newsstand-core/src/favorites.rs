//! Favorited entry names.

use crate::storage::{read_json, write_json, KeyValueStore, FAVORITES_KEY};

/// The set of favorited entry names, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    names: Vec<String>,
}

impl FavoritesStore {
    /// Read the persisted set. Missing or unreadable data yields an empty set.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let names = match read_json::<Vec<String>, _>(store, FAVORITES_KEY) {
            Ok(names) => names.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring stored favorites: {}", e);
                Vec::new()
            }
        };
        Self { names }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Flip membership of `name`, persist the whole set and return the new state.
    ///
    /// A failed write is logged; the in-memory change still holds for the session.
    pub fn toggle<S: KeyValueStore + ?Sized>(&mut self, name: &str, store: &mut S) -> bool {
        let now_favorite = if self.is_favorite(name) {
            self.names.retain(|n| n != name);
            false
        } else {
            self.names.push(name.to_string());
            true
        };

        if let Err(e) = write_json(store, FAVORITES_KEY, &self.names) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }

        now_favorite
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
