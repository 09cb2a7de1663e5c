use std::path::PathBuf;

use reqwest::Client;

use crate::{
    cli::{build_pipeline, progress, resolve_output_dir},
    error, success,
    types::TrackRequest,
    utils, warning,
};

pub async fn download(
    input: String,
    search: bool,
    name: Option<String>,
    output: Option<PathBuf>,
    no_artwork: bool,
) {
    let request = if search || !utils::is_url(&input) {
        TrackRequest::query(&input)
    } else {
        TrackRequest::direct(input.trim())
    };

    let output_dir = resolve_output_dir(output).await;
    let pipeline = build_pipeline(Client::new());
    let filename = name.filter(|n| !n.trim().is_empty());

    let pb = progress::spinner(&format!("Working on {}...", request.display_name));
    let worker = tokio::spawn(async move {
        pipeline
            .download(&request, &output_dir, filename.as_deref(), !no_artwork)
            .await
    });
    let outcome = worker.await;
    pb.finish_and_clear();

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => error!("Download failed: {}", e),
        Err(e) => error!("Download worker stopped unexpectedly: {}", e),
    };

    if let Some(w) = &result.tagging_warning {
        warning!("Saved without artwork: {}", w);
    }

    let saved = result
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| result.output_path.display().to_string());
    success!("Saved: {}", saved);
}
