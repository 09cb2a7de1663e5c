//! Spotify Playlist to MP3 Library
//!
//! This library resolves human-named music tracks (from a Spotify playlist or a
//! direct media link) to a downloadable audio source, transcodes the audio to
//! MP3 and embeds cover artwork into the resulting file. A batch controller
//! drives the pipeline over a whole playlist with per-track failure isolation
//! and structured progress events.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types crossing the pipeline boundary
//! - `management` - Token cache and remembered output folder
//! - `media` - Media search/transcode and artwork collaborators
//! - `pipeline` - Resolver, acquisition engine and batch controller
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (authentication and playlists)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotmp3::{config, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> spotmp3::Res<()> {
//!     config::load_env().await?;
//!     let name = pipeline::normalize("Song: Title? / Name");
//!     assert_eq!(name, "Song Title  Name");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod media;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI glue where the concrete error type does not matter to the
/// caller. Library operations return the typed errors from [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Saved {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable errors in the CLI layer. Library code returns
/// typed errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to remember output folder: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
