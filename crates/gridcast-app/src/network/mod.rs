//! Networking
//!
//! The text-fetch capability injected into the playlist reconciler, and
//! its HTTP implementation.

pub mod client;

pub use client::HttpClient;

use crate::error::Result;

/// A source of raw playlist text
///
/// Implementations turn a playlist URL into the text body of the document,
/// reporting invalid URLs, transport failures, and undecodable bytes as
/// distinct error kinds.
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch the raw text at `url`
    fn fetch_text(&self, url: &str) -> Result<String>;
}
