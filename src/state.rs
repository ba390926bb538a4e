//! Application state shared across HTTP request handlers.
//!
//! Initialised once during startup and cloned into each handler through Axum's state
//! extraction.

use serenity::http::Http;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Discord HTTP client shared with the gateway bot, used to post forum answers.
    pub discord_http: Arc<Http>,
}

impl AppState {
    pub fn new(discord_http: Arc<Http>) -> Self {
        Self { discord_http }
    }
}
