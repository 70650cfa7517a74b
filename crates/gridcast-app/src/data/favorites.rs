//! Favorites management
//!
//! In-memory set of favorite channel IDs, persisted to its own storage
//! slot. Lifecycle is independent of the playlist: clearing the playlist
//! leaves favorites alone.

use crate::config::slots;
use crate::data::storage::{load_slot, save_slot, Storage};
use crate::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Manages favorite channel IDs
pub struct FavoritesManager {
    storage: Arc<dyn Storage>,
    ids: HashSet<String>,
}

impl FavoritesManager {
    /// Create a manager, eagerly loading any persisted favorites
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self> {
        let ids = load_slot::<HashSet<String>>(storage.as_ref(), slots::FAVORITES)?
            .unwrap_or_default();
        Ok(Self { storage, ids })
    }

    /// Whether a channel is favorited
    pub fn is_favorite(&self, channel_id: &str) -> bool {
        self.ids.contains(channel_id)
    }

    /// Mark a channel as favorite
    pub fn add(&mut self, channel_id: impl Into<String>) -> Result<()> {
        self.ids.insert(channel_id.into());
        self.save()
    }

    /// Remove a channel from favorites; removing a non-favorite is a no-op
    pub fn remove(&mut self, channel_id: &str) -> Result<()> {
        self.ids.remove(channel_id);
        self.save()
    }

    /// Toggle favorite status, returning the new status
    pub fn toggle(&mut self, channel_id: &str) -> Result<bool> {
        let now_favorite = if self.ids.contains(channel_id) {
            self.ids.remove(channel_id);
            false
        } else {
            self.ids.insert(channel_id.to_string());
            true
        };
        self.save()?;
        debug!(channel_id, now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Remove all favorites
    pub fn clear(&mut self) -> Result<()> {
        self.ids.clear();
        self.save()
    }

    /// All favorite IDs
    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    /// Number of favorites
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Whether there are no favorites
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn save(&self) -> Result<()> {
        save_slot(self.storage.as_ref(), slots::FAVORITES, &self.ids)
    }
}
