//! Configuration constants for gridcast app services

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "gridcast";
}

/// Named persistence slots
///
/// Each slot is one JSON document in the key-value store. The playlist
/// slots share a lifecycle (cleared together); favorites are independent.
pub mod slots {
    /// Last-used playlist URL (string)
    pub const PLAYLIST_URL: &str = "playlist_url";

    /// Full channel list
    pub const CHANNELS: &str = "channels";

    /// Per-channel order-override map (id -> order)
    pub const CHANNEL_ORDER: &str = "channel_order";

    /// Favorite channel IDs
    pub const FAVORITES: &str = "favorites";
}
