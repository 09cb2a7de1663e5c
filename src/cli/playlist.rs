use std::path::PathBuf;

use reqwest::Client;
use tokio::sync::mpsc;

use crate::{
    cli::{build_pipeline, progress, resolve_output_dir},
    config::SpotifySettings,
    error, info,
    management::TokenManager,
    spotify::{PlaylistProvider, SpotifyClient},
    types::TrackRequest,
};

pub async fn playlist(reference: String, output: Option<PathBuf>) {
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot read Spotify settings. Err: {}", e),
    };

    let tokens = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "Failed to load token. Please run spotmp3 auth\n Error: {}",
            e
        ),
    };

    let http = Client::new();
    let spotify = SpotifyClient::new(http.clone(), settings, tokens);

    let pb = progress::spinner("Fetching playlist...");
    let tracks = spotify.get_tracks(&reference).await;
    pb.finish_and_clear();

    let tracks = match tracks {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch playlist: {}", e),
    };

    let output_dir = resolve_output_dir(output).await;
    info!(
        "Downloading {} tracks to {}",
        tracks.len(),
        output_dir.display()
    );

    let requests: Vec<TrackRequest> = tracks.into_iter().map(TrackRequest::from).collect();
    let total = requests.len();
    let pipeline = build_pipeline(http);

    let (sender, receiver) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        pipeline.run_batch(&requests, &output_dir, &sender).await
    });

    progress::render_batch(receiver, total).await;

    match worker.await {
        Ok(summary) => progress::print_failures(&summary),
        Err(e) => error!("Download worker stopped unexpectedly: {}", e),
    }
}
