use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::{
    error::MediaError,
    media::{EXT_PLACEHOLDER, MediaBackend, Transcoder},
    types::{AudioFormat, MediaCandidate, MediaInfo},
};

/// Media backend and transcoder backed by the `yt-dlp` executable.
///
/// Search results come from `ytsearch1:` queries, transcoding uses yt-dlp's
/// ffmpeg audio extraction.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
}

#[derive(Debug, Deserialize)]
struct SearchOutput {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    webpage_url: Option<String>,
    url: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    title: Option<String>,
    thumbnail: Option<String>,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, MediaError> {
        debug!("running {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| MediaError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MediaError::Failed {
                program: self.binary.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl MediaBackend for YtDlp {
    async fn search(&self, query: &str) -> Result<Vec<MediaCandidate>, MediaError> {
        let target = format!("ytsearch1:{query}");
        let stdout = self
            .run(&[
                "--quiet",
                "--no-warnings",
                "--dump-single-json",
                "--flat-playlist",
                target.as_str(),
            ])
            .await?;

        let candidates = parse_search_output(&stdout)?;
        if candidates.is_empty() {
            return Err(MediaError::NotFound);
        }
        Ok(candidates)
    }

    async fn probe(&self, locator: &str) -> Result<MediaInfo, MediaError> {
        let stdout = self
            .run(&[
                "--quiet",
                "--no-warnings",
                "--dump-single-json",
                "--no-playlist",
                "--skip-download",
                locator,
            ])
            .await
            .map_err(unextractable_as_not_found)?;

        parse_probe_output(&stdout)
    }
}

#[async_trait]
impl Transcoder for YtDlp {
    async fn transcode(
        &self,
        locator: &str,
        output_template: &str,
        format: AudioFormat,
    ) -> Result<PathBuf, MediaError> {
        let quality = format!("{}K", format.bitrate_kbps);
        let stdout = self
            .run(&[
                "--no-warnings",
                "--no-playlist",
                "--force-overwrites",
                "-f",
                "bestaudio/best",
                "-x",
                "--audio-format",
                format.codec,
                "--audio-quality",
                quality.as_str(),
                "-o",
                output_template,
                "--print",
                "after_move:filepath",
                locator,
            ])
            .await?;

        let printed = String::from_utf8_lossy(&stdout)
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from);

        Ok(printed.unwrap_or_else(|| {
            PathBuf::from(output_template.replace(EXT_PLACEHOLDER, format.extension()))
        }))
    }
}

/// yt-dlp reports links it cannot extract with an `ERROR:` line and a non-zero
/// exit. Those mean the locator has no metadata, not that the backend broke.
fn unextractable_as_not_found(err: MediaError) -> MediaError {
    match err {
        MediaError::Failed { ref stderr, .. }
            if stderr.lines().any(|line| line.trim_start().starts_with("ERROR:")) =>
        {
            debug!("probe rejected by yt-dlp: {stderr}");
            MediaError::NotFound
        }
        other => other,
    }
}

/// Reads the JSON printed by `yt-dlp --dump-single-json --flat-playlist ytsearch1:`.
///
/// Candidates keep the backend's rank order. Entries without any locator are dropped.
pub fn parse_search_output(stdout: &[u8]) -> Result<Vec<MediaCandidate>, MediaError> {
    let output: SearchOutput = serde_json::from_slice(stdout)?;

    Ok(output
        .entries
        .into_iter()
        .filter_map(|entry| {
            let locator = entry.webpage_url.or(entry.url)?;
            Some(MediaCandidate {
                display_title: entry.title.unwrap_or_else(|| locator.clone()),
                locator,
            })
        })
        .collect())
}

/// Reads the JSON printed by `yt-dlp --dump-single-json --skip-download <url>`.
pub fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, MediaError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;

    let display_title = output
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(MediaError::NotFound)?;

    Ok(MediaInfo {
        display_title,
        thumbnail_locator: output.thumbnail.filter(|t| !t.trim().is_empty()),
    })
}
