use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::{MediaError, ResolutionError},
    media::MediaBackend,
    types::{ResolvedSource, TrackRequest},
    utils,
};

/// Maps a track request to exactly one concrete media source.
///
/// Search requests take the first-ranked candidate. There is no secondary
/// scoring and no retry.
#[derive(Clone)]
pub struct TrackResolver {
    backend: Arc<dyn MediaBackend>,
}

impl TrackResolver {
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self { backend }
    }

    pub async fn resolve(&self, request: &TrackRequest) -> Result<ResolvedSource, ResolutionError> {
        if request.is_direct_reference {
            self.resolve_direct(&request.query_or_url).await
        } else {
            self.resolve_search(&request.query_or_url).await
        }
    }

    async fn resolve_direct(&self, locator: &str) -> Result<ResolvedSource, ResolutionError> {
        let info = self.backend.probe(locator).await.map_err(|e| match e {
            MediaError::NotFound => ResolutionError::NoMetadata {
                locator: locator.to_string(),
            },
            other => ResolutionError::Backend(other),
        })?;

        Ok(ResolvedSource {
            title: info.display_title,
            media_locator: locator.to_string(),
            artwork_locator: info.thumbnail_locator,
        })
    }

    async fn resolve_search(&self, hint: &str) -> Result<ResolvedSource, ResolutionError> {
        let query = utils::build_search_query(hint);
        debug!("searching for \"{}\"", query);

        let no_results = || ResolutionError::NoResults {
            query: query.clone(),
        };

        let candidates = self.backend.search(&query).await.map_err(|e| match e {
            MediaError::NotFound => no_results(),
            other => ResolutionError::Backend(other),
        })?;

        let first = candidates.into_iter().next().ok_or_else(no_results)?;

        // search listings carry no artwork, so the chosen candidate is probed for it
        match self.backend.probe(&first.locator).await {
            Ok(info) => Ok(ResolvedSource {
                title: info.display_title,
                media_locator: first.locator,
                artwork_locator: info.thumbnail_locator,
            }),
            Err(e) => {
                warn!("no metadata for {}, continuing without artwork: {}", first.locator, e);
                Ok(ResolvedSource {
                    title: first.display_title,
                    media_locator: first.locator,
                    artwork_locator: None,
                })
            }
        }
    }
}
