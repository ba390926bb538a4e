use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusDto {
    pub status: String,
}

/// Answer generated by the external support assistant for a forum thread.
///
/// `thread_id` is accepted either as a JSON string or number since the workflow
/// engine posting it is not strict about types.
#[derive(Deserialize, Debug, Default)]
pub struct AssistantAnswerDto {
    pub thread_id: Option<serde_json::Value>,
    pub ki_answer: Option<String>,
}

/// Payload forwarded to the support webhook for every relevant forum message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForumWebhookPayload {
    pub thread_id: String,
    pub post_title: String,
    pub post_content: String,
    pub author: String,
    pub post_url: String,
}
