//! Error types for the track pipeline and its collaborators.
//!
//! Only [`ResolutionError`] and [`AcquisitionError`] cross the pipeline
//! boundary. [`TaggingWarning`] is produced by the tagging sub-step and is
//! always contained inside the acquisition engine, which reports it on the
//! [`crate::types::AcquisitionResult`] instead of failing.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Failure reported by a media search/extraction or transcoder collaborator.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("not found")]
    NotFound,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("unreadable backend output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// No usable media source could be found for a track request.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no results for query \"{query}\"")]
    NoResults { query: String },

    #[error("no metadata for {locator}")]
    NoMetadata { locator: String },

    #[error("media backend failed: {0}")]
    Backend(#[source] MediaError),
}

impl ResolutionError {
    /// Short machine-friendly reason, `"no results"` or `"no metadata"`.
    pub fn reason(&self) -> &'static str {
        match self {
            ResolutionError::NoResults { .. } => "no results",
            ResolutionError::NoMetadata { .. } => "no metadata",
            ResolutionError::Backend(_) => "backend failure",
        }
    }
}

/// Pipeline stage in which an acquisition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStage {
    CreateDir,
    Transcode,
}

impl fmt::Display for AcquisitionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionStage::CreateDir => write!(f, "create directory"),
            AcquisitionStage::Transcode => write!(f, "transcode"),
        }
    }
}

/// Fatal failure of the core download/transcode step.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transcode failed: {0}")]
    Transcode(#[source] MediaError),
}

impl AcquisitionError {
    pub fn stage(&self) -> AcquisitionStage {
        match self {
            AcquisitionError::CreateDir { .. } => AcquisitionStage::CreateDir,
            AcquisitionError::Transcode(_) => AcquisitionStage::Transcode,
        }
    }
}

/// Failure of a single-item pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

/// Failure of a plain HTTP artwork download.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("artwork request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("artwork request returned status {0}")]
    Status(u16),
}

/// Soft failure of the artwork embedding sub-step.
///
/// The produced audio file is kept regardless of which variant occurs.
#[derive(Debug, Error)]
pub enum TaggingWarning {
    #[error("could not fetch artwork: {0}")]
    ArtworkFetch(#[source] ArtworkError),

    #[error("could not open tag container: {0}")]
    Container(#[source] id3::Error),

    #[error("could not write tags: {0}")]
    Write(#[source] id3::Error),

    #[error("tagging task aborted: {0}")]
    Aborted(String),
}

/// Failure to load required configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Failure of the Spotify authorization flow or token cache.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token response is missing {0}")]
    MissingField(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token cache is unreadable: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid callback server address: {0}")]
    Address(String),

    #[error("authorization timed out")]
    Timeout,

    #[error("authorization was denied: {0}")]
    Denied(String),
}

/// Failure to list the tracks of a playlist. Raised before a batch starts.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("not authorized, run spotmp3 auth: {0}")]
    Auth(String),

    #[error("playlist {0} not found or empty")]
    NotFound(String),

    #[error("cannot read playlist reference \"{0}\"")]
    InvalidReference(String),

    #[error("playlist request failed: {0}")]
    Http(#[from] reqwest::Error),
}
