//! # Track Pipeline
//!
//! Resolution, acquisition and tagging of tracks, plus the batch controller
//! that drives them over a list.
//!
//! ```text
//! TrackRequest -> TrackResolver -> ResolvedSource -> AcquisitionEngine -> file
//! ```
//!
//! - [`normalize`] - title to filesystem-safe file stem
//! - [`TrackResolver`] - request to one concrete media source
//! - [`AcquisitionEngine`] - download, transcode and cover embedding
//! - [`Pipeline::run_batch`] - sequential batch with per-item failure isolation
//!
//! Everything runs sequentially on the caller's task. The CLI runs a whole
//! batch on a single spawned worker, so at most one transcode is in flight
//! and writes to the shared output directory never race.

mod batch;
mod engine;
mod normalize;
mod resolver;

use std::{path::Path, sync::Arc};

pub use batch::{BatchEvent, ProgressObserver};
pub use engine::{AcquisitionEngine, OUTPUT_FORMAT};
pub use normalize::normalize;
pub use resolver::TrackResolver;

use crate::{
    error::PipelineError,
    media::{ArtworkSource, MediaBackend, Transcoder},
    types::{AcquisitionResult, TrackRequest},
};

/// Resolver and engine wired to the same set of collaborators.
#[derive(Clone)]
pub struct Pipeline {
    resolver: TrackResolver,
    engine: AcquisitionEngine,
}

impl Pipeline {
    pub fn new(
        backend: Arc<dyn MediaBackend>,
        transcoder: Arc<dyn Transcoder>,
        artwork: Arc<dyn ArtworkSource>,
    ) -> Self {
        Self {
            resolver: TrackResolver::new(backend),
            engine: AcquisitionEngine::new(transcoder, artwork),
        }
    }

    /// Resolves and acquires a single request. Errors propagate to the caller.
    pub async fn download(
        &self,
        request: &TrackRequest,
        output_dir: &Path,
        filename_override: Option<&str>,
        embed_artwork: bool,
    ) -> Result<AcquisitionResult, PipelineError> {
        let source = self.resolver.resolve(request).await?;
        let result = self
            .engine
            .acquire(source, output_dir, filename_override, embed_artwork)
            .await?;
        Ok(result)
    }
}
