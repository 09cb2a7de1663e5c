use std::{path::Path, sync::Arc};

use id3::{
    Content, ErrorKind, Frame, Tag, TagLike, Version,
    frame::{Picture, PictureType},
};
use tracing::{debug, warn};

use crate::{
    error::{AcquisitionError, TaggingWarning},
    media::{ArtworkSource, EXT_PLACEHOLDER, Transcoder},
    pipeline::normalize,
    types::{AcquisitionResult, AudioFormat, ResolvedSource},
    utils,
};

/// Output policy shared by every acquisition.
pub const OUTPUT_FORMAT: AudioFormat = AudioFormat::MP3_192;

const COVER_MIME: &str = "image/jpeg";
const COVER_DESCRIPTION: &str = "Cover";

/// Downloads and transcodes one resolved source, then embeds its artwork.
///
/// Directory creation and transcoding are fatal. Artwork retrieval and
/// tagging are best effort: their failure is reported on the result and the
/// produced audio file is kept.
#[derive(Clone)]
pub struct AcquisitionEngine {
    transcoder: Arc<dyn Transcoder>,
    artwork: Arc<dyn ArtworkSource>,
}

impl AcquisitionEngine {
    pub fn new(transcoder: Arc<dyn Transcoder>, artwork: Arc<dyn ArtworkSource>) -> Self {
        Self {
            transcoder,
            artwork,
        }
    }

    /// Produces `output_dir/<stem>.mp3` for `source`.
    ///
    /// The stem is the normalized `filename_override`, or the normalized
    /// source title. An existing file with the same stem is overwritten.
    pub async fn acquire(
        &self,
        source: ResolvedSource,
        output_dir: &Path,
        filename_override: Option<&str>,
        embed_artwork: bool,
    ) -> Result<AcquisitionResult, AcquisitionError> {
        async_fs::create_dir_all(output_dir)
            .await
            .map_err(|source| AcquisitionError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let stem = file_stem(filename_override.unwrap_or(&source.title));
        let template = output_dir.join(format!("{}.{}", stem, EXT_PLACEHOLDER));

        let output_path = self
            .transcoder
            .transcode(
                &source.media_locator,
                &template.to_string_lossy(),
                OUTPUT_FORMAT,
            )
            .await
            .map_err(AcquisitionError::Transcode)?;
        debug!("transcoded {} to {}", source.media_locator, output_path.display());

        let mut tagging_warning = None;
        if embed_artwork {
            if let Some(locator) = source.artwork_locator.as_deref() {
                if let Err(warning) = self.embed_cover(&output_path, locator).await {
                    warn!("failed to embed artwork into {}: {}", output_path.display(), warning);
                    tagging_warning = Some(warning);
                }
            }
        }

        Ok(AcquisitionResult {
            output_path,
            tagging_warning,
        })
    }

    async fn embed_cover(&self, path: &Path, locator: &str) -> Result<(), TaggingWarning> {
        let data = self
            .artwork
            .fetch(locator)
            .await
            .map_err(TaggingWarning::ArtworkFetch)?;

        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_cover(&path, data))
            .await
            .map_err(|e| TaggingWarning::Aborted(e.to_string()))?
    }
}

fn file_stem(raw: &str) -> String {
    let stem = normalize(raw);
    if stem.is_empty() {
        utils::fallback_file_stem()
    } else {
        stem
    }
}

/// Replaces the front cover in the file's ID3 tag, creating the tag if absent.
///
/// A tag that exists but cannot be read is left untouched.
fn write_cover(path: &Path, data: Vec<u8>) -> Result<(), TaggingWarning> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(TaggingWarning::Container(e)),
    };

    tag.remove_picture_by_type(PictureType::CoverFront);
    tag.add_frame(Frame::with_content(
        "APIC",
        Content::Picture(Picture {
            mime_type: COVER_MIME.to_string(),
            picture_type: PictureType::CoverFront,
            description: COVER_DESCRIPTION.to_string(),
            data,
        }),
    ));

    tag.write_to_path(path, Version::Id3v24)
        .map_err(TaggingWarning::Write)
}
