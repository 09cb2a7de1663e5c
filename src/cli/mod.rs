//! # CLI Module
//!
//! User-facing commands of spotmp3. Each command wires the configuration,
//! the Spotify client and the track pipeline together, runs the pipeline on
//! one background worker and renders what it reports.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE login, token is cached locally
//! - [`playlist`] - downloads every track of a playlist as a batch
//! - [`download`] - downloads a single link or search result
//! - [`folder`] - shows or changes the remembered output folder
//!
//! ## Output
//!
//! Long-running work shows an `indicatif` spinner or progress bar. Per-track
//! outcomes are printed with the `info!`/`success!`/`warning!` macros and a
//! failed batch item never stops the batch. Tracks that failed are listed in
//! a table once the batch completes.

mod auth;
mod download;
mod folder;
mod playlist;
mod progress;

use std::sync::Arc;

use reqwest::Client;

pub use auth::auth;
pub use download::download;
pub use folder::{folder, resolve_output_dir};
pub use playlist::playlist;

use crate::{
    config,
    media::{HttpArtwork, YtDlp},
    pipeline::Pipeline,
};

fn build_pipeline(http: Client) -> Pipeline {
    let ytdlp = Arc::new(YtDlp::new(config::ytdlp_binary()));
    Pipeline::new(ytdlp.clone(), ytdlp, Arc::new(HttpArtwork::new(http)))
}
