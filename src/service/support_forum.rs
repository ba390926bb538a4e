//! Support forum bridge.
//!
//! Forum posts and follow-up messages are forwarded to an external webhook that
//! generates answers. The answers come back through `POST /ki-antwort` and are posted
//! into the thread.

use std::time::Duration;

use crate::{
    error::AppError,
    model::api::{AssistantAnswerDto, ForumWebhookPayload},
    util::parse::parse_id,
};

/// Timeout for a single webhook delivery.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SupportForumService<'a> {
    http_client: &'a reqwest::Client,
    webhook_url: &'a str,
}

impl<'a> SupportForumService<'a> {
    pub fn new(http_client: &'a reqwest::Client, webhook_url: &'a str) -> Self {
        Self {
            http_client,
            webhook_url,
        }
    }

    /// Posts a forum message to the webhook.
    ///
    /// # Returns
    /// - `Ok(())` - The webhook accepted the payload
    /// - `Err(AppError::ReqwestErr)` - Timeout, connection error or non-success status
    pub async fn forward(&self, payload: &ForumWebhookPayload) -> Result<(), AppError> {
        self.http_client
            .post(self.webhook_url)
            .json(payload)
            .timeout(WEBHOOK_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

pub fn build_payload(
    thread_id: u64,
    thread_name: &str,
    content: &str,
    author: &str,
    post_url: &str,
) -> ForumWebhookPayload {
    ForumWebhookPayload {
        thread_id: thread_id.to_string(),
        post_title: format!("New message in thread: {}", thread_name),
        post_content: content.to_string(),
        author: author.to_string(),
        post_url: post_url.to_string(),
    }
}

/// Whether a thread message should be forwarded.
///
/// The starter message shares its ID with the thread and is forwarded on thread
/// creation instead, so it is skipped here.
pub fn should_forward_message(message_id: u64, thread_id: u64, author_is_bot: bool) -> bool {
    !author_is_bot && message_id != thread_id
}

/// Validates an assistant answer received over HTTP.
///
/// # Returns
/// - `Ok((thread_id, answer))` - Thread to post into and the answer text
/// - `Err(AppError::BadRequest)` - A field is missing or empty, or the thread ID is not numeric
pub fn parse_answer(dto: AssistantAnswerDto) -> Result<(u64, String), AppError> {
    let missing = || AppError::BadRequest("Missing thread_id or ki_answer".to_string());

    let thread_id = match dto.thread_id.ok_or_else(missing)? {
        serde_json::Value::String(id) if !id.trim().is_empty() => parse_id(&id),
        serde_json::Value::Number(id) => id.as_u64().filter(|id| *id != 0),
        serde_json::Value::String(_) | serde_json::Value::Null => return Err(missing()),
        _ => None,
    }
    .ok_or_else(|| AppError::BadRequest("thread_id must be a numeric ID".to_string()))?;

    let answer = dto
        .ki_answer
        .filter(|answer| !answer.trim().is_empty())
        .ok_or_else(missing)?;

    Ok((thread_id, answer))
}

pub fn answer_message(answer: &str) -> String {
    format!("🤖 **AI support assistant:**\n\n{}", answer)
}
