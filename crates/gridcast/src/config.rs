//! Configuration constants for the gridcast engine

/// Playlist format constants
pub mod playlist {
    /// Metadata marker line prefix in extended M3U
    pub const EXTINF_PREFIX: &str = "#EXTINF:";

    /// URI scheme prefixes accepted as stream URL lines
    pub const ALLOWED_SCHEMES: [&str; 4] = ["http://", "https://", "rtmp://", "rtsp://"];

    /// Category label assigned to channels without a `group-title` attribute.
    /// This group always sorts ahead of all others.
    pub const GENERAL_GROUP: &str = "General";

    /// Recognized EXTINF attribute keys
    pub const ATTR_LOGO: &str = "tvg-logo";
    pub const ATTR_GROUP: &str = "group-title";
    pub const ATTR_EPG_ID: &str = "tvg-id";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Gridcast/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}
