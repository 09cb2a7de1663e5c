use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::TaggingWarning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// A track as listed by a playlist provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub title: String,
    pub primary_artist: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// One track to run through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRequest {
    pub display_name: String,
    pub query_or_url: String,
    pub is_direct_reference: bool,
    /// Appended to the resolved title in batch mode to reduce filename collisions.
    pub disambiguator: Option<String>,
}

impl TrackRequest {
    pub fn search(title: &str, artist: &str) -> Self {
        Self {
            display_name: format!("{} - {}", title, artist),
            query_or_url: format!("{} {}", title, artist),
            is_direct_reference: false,
            disambiguator: Some(artist.to_string()),
        }
    }

    pub fn direct(url: &str) -> Self {
        Self {
            display_name: url.to_string(),
            query_or_url: url.to_string(),
            is_direct_reference: true,
            disambiguator: None,
        }
    }

    /// Free-text search that is not tied to a playlist entry.
    pub fn query(text: &str) -> Self {
        Self {
            display_name: text.to_string(),
            query_or_url: text.to_string(),
            is_direct_reference: false,
            disambiguator: None,
        }
    }
}

impl From<TrackDescriptor> for TrackRequest {
    fn from(track: TrackDescriptor) -> Self {
        TrackRequest::search(&track.title, &track.primary_artist)
    }
}

/// A candidate returned by a media search, in backend rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCandidate {
    pub locator: String,
    pub display_title: String,
}

/// Descriptive metadata of a single media locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub display_title: String,
    pub thumbnail_locator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub title: String,
    pub media_locator: String,
    pub artwork_locator: Option<String>,
}

/// Fixed output policy of the transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

impl AudioFormat {
    pub const MP3_192: AudioFormat = AudioFormat {
        codec: "mp3",
        bitrate_kbps: 192,
    };

    pub fn extension(&self) -> &'static str {
        self.codec
    }
}

#[derive(Debug)]
pub struct AcquisitionResult {
    pub output_path: PathBuf,
    /// Set when artwork embedding degraded. The audio file is usable either way.
    pub tagging_warning: Option<TaggingWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub index: usize,
    pub total: usize,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub display_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
}

#[derive(Tabled)]
pub struct FailureTableRow {
    pub track: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSettings {
    pub last_folder: PathBuf,
}
