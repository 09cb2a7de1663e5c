//! # API Module
//!
//! HTTP endpoints of the short-lived local server used during
//! `spotmp3 auth`:
//!
//! - [`callback`] - receives the authorization code from Spotify, exchanges
//!   it for a token and hands the result to the waiting auth flow
//! - [`health`] - reports status and version
//!
//! The server only lives for the duration of one authorization attempt.

mod callback;
mod health;

pub use callback::{CallbackState, callback};
pub use health::health;
