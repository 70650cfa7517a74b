//! Data persistence
//!
//! The key-value storage abstraction plus the favorites store.

pub mod favorites;
pub mod storage;

// Re-export common types
pub use favorites::FavoritesManager;
pub use storage::{config_dir, load_slot, save_slot, FileStorage, MemoryStorage, Storage};
