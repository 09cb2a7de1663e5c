#![allow(dead_code)]

use std::{collections::HashMap, path::PathBuf, sync::Arc, sync::Mutex};

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use spotmp3::{
    error::MediaError,
    media::{EXT_PLACEHOLDER, HttpArtwork, MediaBackend, Transcoder},
    pipeline::Pipeline,
    types::{AudioFormat, MediaCandidate, MediaInfo},
};
use tokio::net::TcpListener;

pub const AUDIO_PAYLOAD: &[u8] = b"not really mpeg audio, but good enough for tagging";
pub const COVER_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

/// Media backend answering from fixed tables.
#[derive(Default)]
pub struct FakeBackend {
    results: HashMap<String, Vec<MediaCandidate>>,
    infos: HashMap<String, MediaInfo>,
    pub searches: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_results(mut self, query: &str, locators: &[(&str, &str)]) -> Self {
        self.results.insert(
            query.to_string(),
            locators
                .iter()
                .map(|(locator, title)| MediaCandidate {
                    locator: locator.to_string(),
                    display_title: title.to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn with_info(mut self, locator: &str, title: &str, thumbnail: Option<&str>) -> Self {
        self.infos.insert(
            locator.to_string(),
            MediaInfo {
                display_title: title.to_string(),
                thumbnail_locator: thumbnail.map(str::to_string),
            },
        );
        self
    }

    pub fn searched(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn search(&self, query: &str) -> Result<Vec<MediaCandidate>, MediaError> {
        self.searches.lock().unwrap().push(query.to_string());
        match self.results.get(query) {
            Some(found) if !found.is_empty() => Ok(found.clone()),
            _ => Err(MediaError::NotFound),
        }
    }

    async fn probe(&self, locator: &str) -> Result<MediaInfo, MediaError> {
        self.infos.get(locator).cloned().ok_or(MediaError::NotFound)
    }
}

/// Transcoder that writes a fixed payload where yt-dlp would put the file.
pub struct FakeTranscoder {
    payload: Vec<u8>,
    failing_locator: Option<String>,
    pub calls: Mutex<Vec<(String, AudioFormat)>>,
}

impl FakeTranscoder {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            failing_locator: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, locator: &str) -> Self {
        self.failing_locator = Some(locator.to_string());
        self
    }
}

#[async_trait]
impl Transcoder for FakeTranscoder {
    async fn transcode(
        &self,
        locator: &str,
        output_template: &str,
        format: AudioFormat,
    ) -> Result<PathBuf, MediaError> {
        self.calls
            .lock()
            .unwrap()
            .push((locator.to_string(), format));

        if self.failing_locator.as_deref() == Some(locator) {
            return Err(MediaError::Failed {
                program: "fake".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "ERROR: unable to download".to_string(),
            });
        }

        let path = PathBuf::from(output_template.replace(EXT_PLACEHOLDER, format.extension()));
        tokio::fs::write(&path, &self.payload).await.unwrap();
        Ok(path)
    }
}

/// Serves `/cover.jpg` (200, JPEG bytes) and `/missing.jpg` (404) on an
/// ephemeral port and returns the base URL.
pub async fn serve_artwork() -> String {
    let app = Router::new()
        .route("/cover.jpg", get(|| async { COVER_BYTES.to_vec() }))
        .route("/missing.jpg", get(|| async { StatusCode::NOT_FOUND }));

    serve(app).await
}

pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn pipeline(backend: FakeBackend, transcoder: FakeTranscoder) -> Pipeline {
    Pipeline::new(
        Arc::new(backend),
        Arc::new(transcoder),
        Arc::new(HttpArtwork::default()),
    )
}
