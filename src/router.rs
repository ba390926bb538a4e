use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controller::support::{health, receive_answer},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ki-antwort", post(receive_answer))
        .route("/health", get(health))
}
