use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config::SpotifySettings,
    error::PlaylistError,
    management::TokenManager,
    types::{PlaylistItem, PlaylistTracksResponse, TrackDescriptor},
    utils,
};

const PAGE_LIMIT: u32 = 100;

#[async_trait]
pub trait PlaylistProvider: Send + Sync {
    /// All tracks of the playlist, in playlist order.
    async fn get_tracks(&self, playlist_ref: &str) -> Result<Vec<TrackDescriptor>, PlaylistError>;
}

/// Spotify Web API client authenticated with a cached user token.
pub struct SpotifyClient {
    http: Client,
    settings: SpotifySettings,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(http: Client, settings: SpotifySettings, tokens: TokenManager) -> Self {
        Self {
            http,
            settings,
            tokens: Mutex::new(tokens),
        }
    }

    async fn access_token(&self) -> String {
        self.tokens
            .lock()
            .await
            .get_valid_token(&self.http, &self.settings)
            .await
    }
}

#[async_trait]
impl PlaylistProvider for SpotifyClient {
    async fn get_tracks(&self, playlist_ref: &str) -> Result<Vec<TrackDescriptor>, PlaylistError> {
        let playlist_id = utils::parse_playlist_id(playlist_ref)?;
        let mut next_url = Some(format!(
            "{uri}/playlists/{id}/tracks?fields=items(track(name,artists(name))),next&limit={limit}",
            uri = self.settings.api_url,
            id = playlist_id,
            limit = PAGE_LIMIT
        ));

        let mut tracks = Vec::new();
        while let Some(url) = next_url.take() {
            debug!("fetching playlist page {}", url);
            let token = self.access_token().await;
            let response = self.http.get(&url).bearer_auth(token).send().await?;

            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(PlaylistError::Auth(response.status().to_string()));
                }
                StatusCode::NOT_FOUND => {
                    return Err(PlaylistError::NotFound(playlist_id.clone()));
                }
                _ => {}
            }

            let page = response
                .error_for_status()?
                .json::<PlaylistTracksResponse>()
                .await?;

            tracks.extend(collect_tracks(page.items));
            next_url = page.next;
        }

        if tracks.is_empty() {
            return Err(PlaylistError::NotFound(playlist_id));
        }

        Ok(tracks)
    }
}

/// Keeps playable entries: items with a track, a name and at least one artist.
pub fn collect_tracks(items: Vec<PlaylistItem>) -> Vec<TrackDescriptor> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| !track.name.trim().is_empty())
        .filter_map(|track| {
            let artist = track.artists.into_iter().next()?;
            Some(TrackDescriptor {
                title: track.name,
                primary_artist: artist.name,
            })
        })
        .collect()
}
