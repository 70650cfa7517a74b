//! Error types for gridcast app services
//!
//! Application-level errors that wrap engine errors and add app-specific
//! variants.

use gridcast::PlaylistError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Playlist(PlaylistError::Fetch(friendly_network_error(&e)))
    }
}

/// Result type alias for gridcast app services
pub type Result<T> = std::result::Result<T, AppError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "connection timed out".to_string();
    }
    format!("network error: {e}")
}
