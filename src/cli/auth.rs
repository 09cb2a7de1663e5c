use reqwest::Client;

use crate::{config::SpotifySettings, error, management::TokenManager, spotify, success};

pub async fn auth() {
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot read Spotify settings. Err: {}", e),
    };

    let client = Client::new();
    let token = match spotify::auth::authorize(&client, &settings).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    if let Err(e) = TokenManager::new(token).persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}
