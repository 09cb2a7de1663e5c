use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::warn;

use crate::api::{self, CallbackState};

/// Serves the OAuth callback endpoints on an already bound listener until the
/// task is aborted.
pub async fn start_api_server(listener: TcpListener, state: CallbackState) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .with_state(state);

    if let Err(e) = axum::serve(listener, app).await {
        warn!("callback server stopped: {}", e);
    }
}
