//! Gridcast engine
//!
//! Core playlist handling: the channel data model and the M3U parser.
//! I/O-free; fetching and persistence live in the `gridcast-app` crate.

pub mod config;
pub mod error;
pub mod playlist;

pub use error::{PlaylistError, Result};
pub use playlist::types::{channel_id, Channel, ChannelGroup};
