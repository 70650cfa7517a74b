//! Gridcast app services
//!
//! Playlist reconciliation, favorites, persistence, and networking
//! utilities. Depends on the `gridcast` engine crate.

pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod playlist;

pub use data::FavoritesManager;
pub use error::{AppError, Result};
pub use network::{HttpClient, PlaylistFetcher};
pub use playlist::PlaylistManager;
