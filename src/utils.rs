use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::error::PlaylistError;

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// File stem used when a title normalizes to nothing.
pub fn fallback_file_stem() -> String {
    format!("track-{}", random_alphanumeric(8))
}

/// Biases a free-text search toward audio-only uploads.
pub fn build_search_query(hint: &str) -> String {
    format!("{} audio", hint.trim())
}

/// Extracts the playlist id from a share URL, a `spotify:playlist:` URI or a bare id.
pub fn parse_playlist_id(reference: &str) -> Result<String, PlaylistError> {
    let reference = reference.trim();

    let id = if let Some((_, rest)) = reference.split_once("playlist/") {
        rest
    } else if let Some(rest) = reference.strip_prefix("spotify:playlist:") {
        rest
    } else {
        reference
    };

    let id = id.split(['?', '#', '/']).next().unwrap_or_default();

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PlaylistError::InvalidReference(reference.to_string()));
    }

    Ok(id.to_string())
}

/// Returns true when the input looks like a link rather than a search phrase.
pub fn is_url(input: &str) -> bool {
    let input = input.trim();
    input.starts_with("http://") || input.starts_with("https://")
}
