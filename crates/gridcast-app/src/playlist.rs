//! Playlist reconciliation
//!
//! `PlaylistManager` owns the playlist state: it fetches raw M3U text
//! through the injected fetch capability, parses it, re-applies persisted
//! custom ordering, groups channels by category, and keeps the result
//! cached in storage. All mutating operations take `&mut self`, so a
//! single owner serializes them; callers on multiple threads wrap the
//! manager in a `Mutex`.

use gridcast::config::playlist::GENERAL_GROUP;
use gridcast::playlist::parser;
use gridcast::{Channel, ChannelGroup};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::slots;
use crate::data::storage::{load_slot, save_slot, FileStorage, Storage};
use crate::error::Result;
use crate::network::{HttpClient, PlaylistFetcher};

/// Owns and reconciles playlist state
///
/// Construction eagerly loads any persisted channel list and URL, so
/// callers have immediately-available state before any network fetch
/// completes; the caller decides when to refresh.
pub struct PlaylistManager {
    storage: Arc<dyn Storage>,
    fetcher: Box<dyn PlaylistFetcher>,

    channels: Vec<Channel>,
    groups: Vec<ChannelGroup>,
    playlist_url: String,
    is_loading: bool,
    last_error: Option<String>,
}

impl PlaylistManager {
    /// Create a manager over the given storage and fetch capability
    pub fn new(storage: Arc<dyn Storage>, fetcher: Box<dyn PlaylistFetcher>) -> Result<Self> {
        let channels =
            load_slot::<Vec<Channel>>(storage.as_ref(), slots::CHANNELS)?.unwrap_or_default();
        let playlist_url =
            load_slot::<String>(storage.as_ref(), slots::PLAYLIST_URL)?.unwrap_or_default();
        let groups = group_channels(&channels);

        Ok(Self {
            storage,
            fetcher,
            channels,
            groups,
            playlist_url,
            is_loading: false,
            last_error: None,
        })
    }

    /// Create a manager with file-backed storage and an HTTP fetcher
    pub fn with_defaults() -> Result<Self> {
        let storage = Arc::new(FileStorage::new()?);
        let fetcher = Box::new(HttpClient::new()?);
        Self::new(storage, fetcher)
    }

    // === Accessors ===

    /// Flat channel list, sorted by `order`
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Channels grouped by category, general group first
    pub fn groups(&self) -> &[ChannelGroup] {
        &self.groups
    }

    /// The currently loaded playlist URL, empty if none
    pub fn playlist_url(&self) -> &str {
        &self.playlist_url
    }

    /// True for the whole span of a load/refresh call
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Human-readable message from the most recent failed load, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // === Loading ===

    /// Fetch, parse, reconcile, group, and persist the playlist at `url`
    ///
    /// On any failure the error message is stored and previously loaded
    /// channels, groups, and persisted state are left unchanged.
    pub fn load_playlist(&mut self, url: &str) -> Result<()> {
        self.is_loading = true;
        self.last_error = None;

        let result = self.load_inner(url);

        if let Err(e) = &result {
            warn!(url, error = %e, "playlist load failed");
            self.last_error = Some(e.to_string());
        }
        self.is_loading = false;
        result
    }

    fn load_inner(&mut self, url: &str) -> Result<()> {
        let text = self.fetcher.fetch_text(url)?;
        let parsed = parser::parse(&text);
        let channels = self.apply_custom_order(parsed);
        let groups = group_channels(&channels);

        // Persist before swapping state, so stored and in-memory state
        // never disagree after a failure
        save_slot(self.storage.as_ref(), slots::PLAYLIST_URL, &url)?;
        save_slot(self.storage.as_ref(), slots::CHANNELS, &channels)?;

        info!(
            url,
            channels = channels.len(),
            groups = groups.len(),
            "playlist loaded"
        );
        self.channels = channels;
        self.groups = groups;
        self.playlist_url = url.to_string();
        Ok(())
    }

    /// Re-load the stored playlist URL; a no-op (no fetch) if none is set
    pub fn refresh_playlist(&mut self) -> Result<()> {
        if self.playlist_url.is_empty() {
            return Ok(());
        }
        let url = self.playlist_url.clone();
        self.load_playlist(&url)
    }

    /// Patch freshly parsed channels with the persisted order-override
    /// map, then sort by order (stable, ties keep parse sequence)
    fn apply_custom_order(&self, mut channels: Vec<Channel>) -> Vec<Channel> {
        let order_map =
            match load_slot::<HashMap<String, u32>>(self.storage.as_ref(), slots::CHANNEL_ORDER) {
                Ok(Some(map)) => map,
                Ok(None) => return channels,
                Err(e) => {
                    // A corrupt override map must not fail the load
                    warn!(error = %e, "ignoring unreadable channel-order map");
                    return channels;
                }
            };

        for channel in &mut channels {
            if let Some(&order) = order_map.get(&channel.id) {
                channel.order = order;
            }
        }
        channels.sort_by_key(|c| c.order);
        channels
    }

    // === Reordering ===

    /// Move a channel within one group from `from` to `to`
    ///
    /// Re-assigns contiguous orders to the group's channels, propagates
    /// them to the flat list by ID, and persists both the channel list and
    /// the order-override map. Unknown group names and out-of-range
    /// indices are silent no-ops.
    pub fn move_channel(&mut self, group_name: &str, from: usize, to: usize) -> Result<()> {
        let Some(group) = self.groups.iter_mut().find(|g| g.name == group_name) else {
            return Ok(());
        };
        if from >= group.channels.len() || to >= group.channels.len() {
            return Ok(());
        }

        let channel = group.channels.remove(from);
        group.channels.insert(to, channel);

        for (index, channel) in group.channels.iter_mut().enumerate() {
            channel.order = index as u32;
            if let Some(main) = self.channels.iter_mut().find(|c| c.id == channel.id) {
                main.order = index as u32;
            }
        }

        save_slot(self.storage.as_ref(), slots::CHANNELS, &self.channels)?;
        self.save_order_map()
    }

    /// Persist the current id -> order mapping of every channel, so custom
    /// ordering survives the next fresh parse
    fn save_order_map(&self) -> Result<()> {
        let order_map: HashMap<&str, u32> = self
            .channels
            .iter()
            .map(|c| (c.id.as_str(), c.order))
            .collect();
        save_slot(self.storage.as_ref(), slots::CHANNEL_ORDER, &order_map)
    }

    // === Clearing ===

    /// Reset channels, groups, and URL, and delete their persisted slots
    ///
    /// Favorites have an independent lifecycle and are untouched.
    pub fn clear_playlist(&mut self) -> Result<()> {
        self.channels.clear();
        self.groups.clear();
        self.playlist_url.clear();
        self.last_error = None;

        self.storage.delete(slots::PLAYLIST_URL)?;
        self.storage.delete(slots::CHANNELS)?;
        self.storage.delete(slots::CHANNEL_ORDER)?;
        info!("playlist cleared");
        Ok(())
    }
}

/// Partition channels by group label
///
/// Each group keeps its channels in first-seen order. The general group
/// always sorts first; all other groups sort lexicographically by name.
pub fn group_channels(channels: &[Channel]) -> Vec<ChannelGroup> {
    let mut buckets: HashMap<&str, Vec<Channel>> = HashMap::new();
    for channel in channels {
        buckets
            .entry(channel.group.as_str())
            .or_default()
            .push(channel.clone());
    }

    let mut groups: Vec<ChannelGroup> = buckets
        .into_iter()
        .map(|(name, channels)| ChannelGroup::new(name, channels))
        .collect();

    groups.sort_by(|a, b| match (a.name == GENERAL_GROUP, b.name == GENERAL_GROUP) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
    groups
}
