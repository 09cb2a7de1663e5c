use std::{collections::HashMap, sync::Arc};

use axum::{extract::Query, extract::State, response::Html};
use reqwest::Client;
use tokio::sync::{Mutex, oneshot};

use crate::{config::SpotifySettings, error::AuthError, spotify, types::Token};

type TokenSender = oneshot::Sender<Result<Token, AuthError>>;

/// State shared with the callback handler for one authorization attempt.
#[derive(Clone)]
pub struct CallbackState {
    client: Client,
    settings: SpotifySettings,
    code_verifier: Arc<String>,
    sender: Arc<Mutex<Option<TokenSender>>>,
}

impl CallbackState {
    pub fn new(
        client: Client,
        settings: SpotifySettings,
        code_verifier: String,
        sender: TokenSender,
    ) -> Self {
        Self {
            client,
            settings,
            code_verifier: Arc::new(code_verifier),
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    async fn deliver(&self, result: Result<Token, AuthError>) -> bool {
        match self.sender.lock().await.take() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

pub async fn callback(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        state.deliver(Err(AuthError::Denied(reason.clone()))).await;
        return Html("<h4>Login was denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let result = spotify::auth::exchange_code_pkce(
        &state.client,
        &state.settings,
        code,
        &state.code_verifier,
    )
    .await;

    let succeeded = result.is_ok();
    if !state.deliver(result).await {
        return Html("<h4>This login attempt has already completed.</h4>");
    }

    if succeeded {
        Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
    } else {
        Html("<h4>Login failed.</h4>")
    }
}
