//! Support forum bridge: new forum posts and their follow-ups are sent to the
//! assistant webhook.

use serenity::all::{ChannelType, Context, GuildChannel, Message, MessageId};

use crate::{
    config::Config,
    service::support_forum::{build_payload, SupportForumService},
};

/// Whether `channel` is a post in the configured support forum.
pub fn is_support_thread(config: &Config, channel: &GuildChannel) -> bool {
    channel.kind == ChannelType::PublicThread
        && config.support_forum.is_enabled()
        && channel.parent_id.map(|id| id.get()) == config.support_forum.forum_channel_id
}

/// Posts a thread message to the webhook; failures are logged.
pub async fn forward_message(
    config: &Config,
    http_client: &reqwest::Client,
    thread: &GuildChannel,
    message: &Message,
) {
    let Some(webhook_url) = config.support_forum.webhook_url.as_deref() else {
        return;
    };

    let payload = build_payload(
        thread.id.get(),
        &thread.name,
        &message.content,
        &message.author.name,
        &message.link(),
    );

    match SupportForumService::new(http_client, webhook_url)
        .forward(&payload)
        .await
    {
        Ok(()) => tracing::debug!("Forwarded message {} of thread {}", message.id, thread.id),
        Err(e) => tracing::error!("Failed to forward thread {} to the webhook: {}", thread.id, e),
    }
}

/// Handles the thread_create event
///
/// The starter message of a forum post shares its ID with the thread.
pub async fn handle_thread_create(
    config: &Config,
    http_client: &reqwest::Client,
    ctx: Context,
    thread: GuildChannel,
) {
    if !is_support_thread(config, &thread) {
        return;
    }

    let starter = match thread
        .id
        .message(&ctx.http, MessageId::new(thread.id.get()))
        .await
    {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to fetch starter message of thread {}: {:?}", thread.id, e);
            return;
        }
    };

    forward_message(config, http_client, &thread, &starter).await;
}
