//! # Media Collaborators
//!
//! Seams between the pipeline and the outside world:
//!
//! - [`MediaBackend`] - ranked search and metadata probing of media locators
//! - [`Transcoder`] - download plus transcode of one locator into an audio file
//! - [`ArtworkSource`] - plain retrieval of artwork bytes
//!
//! [`YtDlp`] implements the first two by shelling out to `yt-dlp`,
//! [`HttpArtwork`] implements the last one with `reqwest`. Tests substitute
//! their own implementations.

mod artwork;
mod ytdlp;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    error::{ArtworkError, MediaError},
    types::{AudioFormat, MediaCandidate, MediaInfo},
};

pub use artwork::HttpArtwork;
pub use ytdlp::{YtDlp, parse_probe_output, parse_search_output};

#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Ranked candidates for a free-text query, best match first.
    async fn search(&self, query: &str) -> Result<Vec<MediaCandidate>, MediaError>;

    /// Descriptive metadata of a locator, without downloading the media.
    async fn probe(&self, locator: &str) -> Result<MediaInfo, MediaError>;
}

#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Downloads `locator` and encodes it to `format`.
    ///
    /// `output_template` is a path whose extension is the literal `%(ext)s`
    /// placeholder. Returns the path of the produced file.
    async fn transcode(
        &self,
        locator: &str,
        output_template: &str,
        format: AudioFormat,
    ) -> Result<PathBuf, MediaError>;
}

#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, ArtworkError>;
}

/// Placeholder the transcoder replaces with the produced file extension.
pub const EXT_PLACEHOLDER: &str = "%(ext)s";
