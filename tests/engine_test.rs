mod common;

use std::sync::Arc;

use common::{AUDIO_PAYLOAD, COVER_BYTES, FakeTranscoder, serve_artwork};
use id3::{
    Content, Frame, Tag, TagLike, Version,
    frame::{Picture, PictureType},
};
use spotmp3::{
    error::{AcquisitionStage, ArtworkError, TaggingWarning},
    media::HttpArtwork,
    pipeline::{AcquisitionEngine, OUTPUT_FORMAT},
    types::{AudioFormat, ResolvedSource},
};

fn engine(transcoder: FakeTranscoder) -> AcquisitionEngine {
    AcquisitionEngine::new(Arc::new(transcoder), Arc::new(HttpArtwork::default()))
}

fn source(title: &str, artwork: Option<String>) -> ResolvedSource {
    ResolvedSource {
        title: title.to_string(),
        media_locator: "https://media.example/watch?v=abc".to_string(),
        artwork_locator: artwork,
    }
}

#[test]
fn test_output_format_is_fixed_mp3_192() {
    assert_eq!(OUTPUT_FORMAT, AudioFormat::MP3_192);
    assert_eq!(OUTPUT_FORMAT.codec, "mp3");
    assert_eq!(OUTPUT_FORMAT.bitrate_kbps, 192);
}

#[tokio::test]
async fn test_broken_artwork_url_still_yields_output_file() {
    let base = serve_artwork().await;
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(
            source("Song", Some(format!("{}/missing.jpg", base))),
            dir.path(),
            None,
            true,
        )
        .await
        .expect("artwork failure must not fail the acquisition");

    assert_eq!(result.output_path, dir.path().join("Song.mp3"));
    assert_eq!(std::fs::read(&result.output_path).unwrap(), AUDIO_PAYLOAD);
    assert!(matches!(
        result.tagging_warning,
        Some(TaggingWarning::ArtworkFetch(ArtworkError::Status(404)))
    ));
}

#[tokio::test]
async fn test_unreachable_artwork_host_still_yields_output_file() {
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(
            source("Song", Some("http://127.0.0.1:1/cover.jpg".to_string())),
            dir.path(),
            None,
            true,
        )
        .await
        .unwrap();

    assert!(result.output_path.is_file());
    assert!(matches!(
        result.tagging_warning,
        Some(TaggingWarning::ArtworkFetch(ArtworkError::Http(_)))
    ));
}

#[tokio::test]
async fn test_artwork_is_embedded_as_single_front_cover() {
    let base = serve_artwork().await;
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(
            source("Song", Some(format!("{}/cover.jpg", base))),
            dir.path(),
            None,
            true,
        )
        .await
        .unwrap();

    assert!(result.tagging_warning.is_none());

    let tag = Tag::read_from_path(&result.output_path).unwrap();
    let pictures: Vec<_> = tag.pictures().collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
    assert_eq!(pictures[0].mime_type, "image/jpeg");
    assert_eq!(pictures[0].description, "Cover");
    assert_eq!(pictures[0].data, COVER_BYTES);
}

#[tokio::test]
async fn test_existing_cover_is_replaced_not_duplicated() {
    let base = serve_artwork().await;
    let dir = tempfile::tempdir().unwrap();

    // audio that already carries a tag with an old front cover
    let seed = dir.path().join("seed.bin");
    std::fs::write(&seed, AUDIO_PAYLOAD).unwrap();
    let mut tag = Tag::new();
    tag.set_title("Existing Title");
    tag.add_frame(Frame::with_content(
        "APIC",
        Content::Picture(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: "old".to_string(),
            data: vec![1, 2, 3],
        }),
    ));
    tag.write_to_path(&seed, Version::Id3v24).unwrap();
    let payload = std::fs::read(&seed).unwrap();
    let out = dir.path().join("out");

    let result = engine(FakeTranscoder::new(&payload))
        .acquire(
            source("Song", Some(format!("{}/cover.jpg", base))),
            &out,
            None,
            true,
        )
        .await
        .unwrap();

    assert!(result.tagging_warning.is_none());
    let tag = Tag::read_from_path(&result.output_path).unwrap();
    let pictures: Vec<_> = tag.pictures().collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].description, "Cover");
    assert_eq!(pictures[0].data, COVER_BYTES);
    assert_eq!(tag.title(), Some("Existing Title"));
}

#[tokio::test]
async fn test_embed_disabled_leaves_file_untagged() {
    let base = serve_artwork().await;
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(
            source("Song", Some(format!("{}/cover.jpg", base))),
            dir.path(),
            None,
            false,
        )
        .await
        .unwrap();

    assert!(result.tagging_warning.is_none());
    assert_eq!(std::fs::read(&result.output_path).unwrap(), AUDIO_PAYLOAD);
}

#[tokio::test]
async fn test_missing_artwork_locator_skips_tagging() {
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(source("Song", None), dir.path(), None, true)
        .await
        .unwrap();

    assert!(result.tagging_warning.is_none());
    assert_eq!(std::fs::read(&result.output_path).unwrap(), AUDIO_PAYLOAD);
}

#[tokio::test]
async fn test_same_safe_name_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();

    let first = engine(FakeTranscoder::new(b"first take"))
        .acquire(source("Song: Title?", None), dir.path(), None, false)
        .await
        .unwrap();
    let second = engine(FakeTranscoder::new(b"second take"))
        .acquire(source("Song Title", None), dir.path(), None, false)
        .await
        .unwrap();

    // no uniqueness guarantee: both titles normalize to the same stem
    assert_eq!(first.output_path, second.output_path);
    assert_eq!(std::fs::read(&second.output_path).unwrap(), b"second take");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_filename_override_is_normalized() {
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(
            source("Ignored Title", None),
            dir.path(),
            Some("My: Song? / Mix  "),
            false,
        )
        .await
        .unwrap();

    assert_eq!(result.output_path, dir.path().join("My Song  Mix.mp3"));
}

#[tokio::test]
async fn test_empty_normalized_name_gets_generated_stem() {
    let dir = tempfile::tempdir().unwrap();

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(source("???", None), dir.path(), None, false)
        .await
        .unwrap();

    let name = result.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("track-"), "unexpected name {}", name);
    assert!(name.ends_with(".mp3"));
    assert_eq!(name.len(), "track-".len() + 8 + ".mp3".len());
}

#[tokio::test]
async fn test_output_dir_is_created_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("c");

    let result = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(source("Song", None), &nested, None, false)
        .await
        .unwrap();

    assert_eq!(result.output_path, nested.join("Song.mp3"));
    assert!(result.output_path.is_file());
}

#[tokio::test]
async fn test_transcode_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let transcoder =
        FakeTranscoder::new(AUDIO_PAYLOAD).failing_on("https://media.example/watch?v=abc");

    let err = engine(transcoder)
        .acquire(source("Song", None), dir.path(), None, true)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), AcquisitionStage::Transcode);
    assert!(!dir.path().join("Song.mp3").exists());
}

#[tokio::test]
async fn test_unusable_output_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let err = engine(FakeTranscoder::new(AUDIO_PAYLOAD))
        .acquire(source("Song", None), &blocker.join("out"), None, true)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), AcquisitionStage::CreateDir);
}

#[tokio::test]
async fn test_transcoder_receives_template_and_fixed_format() {
    let dir = tempfile::tempdir().unwrap();
    let transcoder = Arc::new(FakeTranscoder::new(AUDIO_PAYLOAD));
    let engine = AcquisitionEngine::new(transcoder.clone(), Arc::new(HttpArtwork::default()));

    engine
        .acquire(source("Song", None), dir.path(), None, false)
        .await
        .unwrap();

    let calls = transcoder.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "https://media.example/watch?v=abc");
    assert_eq!(calls[0].1, AudioFormat::MP3_192);
}
