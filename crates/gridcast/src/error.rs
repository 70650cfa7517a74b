//! Error types for the gridcast engine
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the gridcast engine
///
/// All three variants are recoverable by retrying the load; none corrupts
/// previously persisted state.
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The supplied playlist URL is not a well-formed URI
    #[error("Invalid playlist URL: {0}")]
    InvalidUrl(String),

    /// Network/transport failure or non-success response status
    #[error("Playlist download failed: {0}")]
    Fetch(String),

    /// Response bytes are not valid text
    #[error("Playlist content could not be read: {0}")]
    Decode(String),
}

/// Result type alias for the gridcast engine
pub type Result<T> = std::result::Result<T, PlaylistError>;
