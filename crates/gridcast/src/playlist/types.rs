//! Channel data types
//!
//! Shared types for playlist entries and their grouping.

use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::config::playlist::GENERAL_GROUP;

/// Generate a deterministic channel ID from its stable fields
///
/// Hashing name + stream URL means the same playlist entry keeps the same
/// ID across re-parses, so persisted order overrides and favorites stay
/// attached through playlist refreshes.
pub fn channel_id(name: &str, stream_url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    stream_url.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// One playlist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    /// Stable identifier, derived from name + stream URL
    pub id: String,
    /// Display name
    pub name: String,
    /// Playback URI
    pub stream_url: String,
    /// Logo image URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Category label
    #[serde(default = "default_group")]
    pub group: String,
    /// External program-guide identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epg_id: Option<String>,
    /// Position within the channel's group. Values need not be contiguous;
    /// sorting is stable with ties broken by parse sequence.
    #[serde(default)]
    pub order: u32,
}

fn default_group() -> String {
    GENERAL_GROUP.to_string()
}

impl Channel {
    /// Create a channel with minimal info, in the general group
    pub fn new(name: impl Into<String>, stream_url: impl Into<String>) -> Self {
        let name = name.into();
        let stream_url = stream_url.into();
        Self {
            id: channel_id(&name, &stream_url),
            name,
            stream_url,
            logo_url: None,
            group: GENERAL_GROUP.to_string(),
            epg_id: None,
            order: 0,
        }
    }

    /// Set the logo URL
    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Set the category label
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the program-guide identifier
    pub fn with_epg_id(mut self, epg_id: impl Into<String>) -> Self {
        self.epg_id = Some(epg_id.into());
        self
    }

    /// Set the position within the group
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

/// A named partition of channels
///
/// The name doubles as identity: one group per distinct label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelGroup {
    pub name: String,
    /// Channels sorted by `order`
    pub channels: Vec<Channel>,
}

impl ChannelGroup {
    pub fn new(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        Self {
            name: name.into(),
            channels,
        }
    }

    /// Whether this is the default general group
    pub fn is_general(&self) -> bool {
        self.name == GENERAL_GROUP
    }
}
