use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serenity::all::{Channel, ChannelId, ChannelType, CreateMessage, Http};
use std::sync::Arc;

use crate::{
    error::AppError,
    model::api::{AssistantAnswerDto, StatusDto},
    service::support_forum::{answer_message, parse_answer},
    state::AppState,
};

/// Receives an assistant answer for a support forum thread.
///
/// The answer is posted to Discord in the background so the caller is not kept
/// waiting on the Discord API.
///
/// # Returns
/// - `200 OK` - `{"status": "Accepted for Discord sending"}`
/// - `400 Bad Request` - Body is not JSON, a field is missing or empty, or the thread ID is not numeric
pub async fn receive_answer(
    State(state): State<AppState>,
    payload: Result<Json<AssistantAnswerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (thread_id, answer) = parse_answer(payload)?;

    tracing::info!("Received assistant answer for thread {}", thread_id);

    let discord_http = state.discord_http.clone();
    tokio::spawn(async move {
        post_answer(discord_http, thread_id, answer).await;
    });

    Ok((
        StatusCode::OK,
        Json(StatusDto {
            status: "Accepted for Discord sending".to_string(),
        }),
    ))
}

async fn post_answer(http: Arc<Http>, thread_id: u64, answer: String) {
    let channel_id = ChannelId::new(thread_id);

    let thread = match channel_id.to_channel(&http).await {
        Ok(Channel::Guild(channel))
            if matches!(
                channel.kind,
                ChannelType::PublicThread | ChannelType::PrivateThread
            ) =>
        {
            channel
        }
        Ok(_) => {
            tracing::warn!("Channel {} is not a thread, dropping assistant answer", thread_id);
            return;
        }
        Err(e) => {
            tracing::error!("Failed to resolve thread {}: {:?}", thread_id, e);
            return;
        }
    };

    match thread
        .send_message(&http, CreateMessage::new().content(answer_message(&answer)))
        .await
    {
        Ok(_) => tracing::info!("Posted assistant answer to thread {}", thread_id),
        Err(e) => tracing::error!("Failed to post assistant answer to {}: {:?}", thread_id, e),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(StatusDto {
        status: "ok".to_string(),
    })
}
