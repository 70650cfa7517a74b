//! Gridcast CLI — load and inspect M3U playlists from the terminal

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gridcast_app::data::{FavoritesManager, FileStorage};
use gridcast_app::{HttpClient, PlaylistManager};

#[derive(Parser)]
#[command(name = "gridcast", about = "IPTV playlist manager", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a playlist URL and store it
    Load {
        /// Playlist URL (M3U/M3U8)
        url: String,
    },
    /// Re-fetch the stored playlist URL
    Refresh,
    /// List channels, grouped by category
    List {
        /// Only show one group
        #[arg(long)]
        group: Option<String>,
    },
    /// Forget the stored playlist (favorites are kept)
    Clear,
    /// Toggle favorite status for a channel ID
    Favorite {
        /// Channel ID (shown by `list`)
        id: String,
    },
    /// List favorite channels
    Favorites,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> gridcast_app::Result<()> {
    let cli = Cli::parse();

    let storage = std::sync::Arc::new(FileStorage::new()?);
    let fetcher = Box::new(HttpClient::new()?);
    let mut manager = PlaylistManager::new(storage.clone(), fetcher)?;

    match cli.command {
        Command::Load { url } => {
            manager.load_playlist(&url)?;
            println!(
                "Loaded {} channels in {} groups",
                manager.channels().len(),
                manager.groups().len()
            );
        }
        Command::Refresh => {
            if manager.playlist_url().is_empty() {
                println!("No playlist URL stored; use `gridcast load <url>` first");
                return Ok(());
            }
            manager.refresh_playlist()?;
            println!(
                "Refreshed {} channels in {} groups",
                manager.channels().len(),
                manager.groups().len()
            );
        }
        Command::List { group } => {
            let favorites = FavoritesManager::new(storage)?;
            for g in manager.groups() {
                if let Some(ref only) = group {
                    if &g.name != only {
                        continue;
                    }
                }
                println!("{} ({})", g.name, g.channels.len());
                for ch in &g.channels {
                    let star = if favorites.is_favorite(&ch.id) { "*" } else { " " };
                    println!("  {star} [{}] {}  {}", ch.id, ch.name, ch.stream_url);
                }
            }
        }
        Command::Clear => {
            manager.clear_playlist()?;
            println!("Playlist cleared");
        }
        Command::Favorite { id } => {
            let mut favorites = FavoritesManager::new(storage)?;
            if favorites.toggle(&id)? {
                println!("Added favorite {id}");
            } else {
                println!("Removed favorite {id}");
            }
        }
        Command::Favorites => {
            let favorites = FavoritesManager::new(storage)?;
            let mut shown = 0;
            for ch in manager.channels() {
                if favorites.is_favorite(&ch.id) {
                    println!("[{}] {}  {}", ch.id, ch.name, ch.stream_url);
                    shown += 1;
                }
            }
            if shown == 0 {
                println!("No favorites");
            }
        }
    }

    Ok(())
}
