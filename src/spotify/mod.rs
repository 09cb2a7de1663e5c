//! # Spotify Integration Module
//!
//! The playlist provider of the pipeline. It turns a playlist reference into
//! a flat, ordered list of `{ title, primary_artist }` descriptors.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//! - [`playlist`] - [`PlaylistProvider`] and its Web API implementation
//!
//! ## Client lifecycle
//!
//! A single [`SpotifyClient`] is built at process start from the settings and
//! the cached token, then passed by reference to whoever needs playlist
//! data. There is no global client.
//!
//! ```text
//! Settings + TokenManager -> SpotifyClient -> get_tracks(playlist) -> Vec<TrackDescriptor>
//! ```
//!
//! ## Errors
//!
//! Playlist failures ([`crate::error::PlaylistError`]) are raised before any
//! batch begins: 401/403 mean the cached token is unusable, 404 or an empty
//! playlist mean there is nothing to download.

pub mod auth;
pub mod playlist;

pub use playlist::{PlaylistProvider, SpotifyClient, collect_tracks};
