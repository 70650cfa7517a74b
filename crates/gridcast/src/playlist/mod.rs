//! Playlist handling
//!
//! Channel data model and the M3U/M3U8 text parser.

pub mod parser;
pub mod types;

pub use parser::parse;
pub use types::{channel_id, Channel, ChannelGroup};
