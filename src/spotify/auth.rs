use std::{net::SocketAddr, str::FromStr, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{
    api::CallbackState, config::SpotifySettings, error::AuthError, server::start_api_server,
    types::Token, utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE authorization flow and returns the obtained token.
///
/// Starts the local callback server, opens the authorization page in the
/// browser and waits up to 60 seconds for the callback to deliver a token.
pub async fn authorize(client: &Client, settings: &SpotifySettings) -> Result<Token, AuthError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let addr = SocketAddr::from_str(&settings.server_address)
        .map_err(|e| AuthError::Address(format!("{}: {}", settings.server_address, e)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let (sender, receiver) = oneshot::channel();
    let state = CallbackState::new(client.clone(), settings.clone(), code_verifier, sender);
    let server = tokio::spawn(start_api_server(listener, state));

    let auth_url = authorization_url(settings, &code_challenge);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let outcome = tokio::time::timeout(AUTH_TIMEOUT, receiver).await;
    server.abort();

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(_)) | Err(_) => Err(AuthError::Timeout),
    }
}

pub fn authorization_url(settings: &SpotifySettings, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = settings.auth_url,
        client_id = settings.client_id,
        redirect_uri = settings.redirect_uri,
        code_challenge = code_challenge,
        scope = settings.scope.replace(' ', "%20"),
    )
}

pub async fn exchange_code_pkce(
    client: &Client,
    settings: &SpotifySettings,
    code: &str,
    verifier: &str,
) -> Result<Token, AuthError> {
    let res = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    parse_token_response(&json, None)
}

pub async fn refresh_token(
    client: &Client,
    settings: &SpotifySettings,
    refresh_token: &str,
) -> Result<Token, AuthError> {
    let res = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    parse_token_response(&json, Some(refresh_token))
}

/// Builds a [`Token`] from a token endpoint response.
///
/// Refresh responses may omit `refresh_token`, in which case
/// `previous_refresh` is kept.
pub fn parse_token_response(json: &Value, previous_refresh: Option<&str>) -> Result<Token, AuthError> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or(AuthError::MissingField("access_token"))?;

    let refresh_token = json["refresh_token"]
        .as_str()
        .or(previous_refresh)
        .ok_or(AuthError::MissingField("refresh_token"))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
