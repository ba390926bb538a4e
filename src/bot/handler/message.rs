use sea_orm::DatabaseConnection;
use serenity::all::{Context, Message};

use crate::{
    bot::{
        handler::thread::{forward_message, is_support_thread},
        modmail, prefix,
    },
    config::Config,
    service::support_forum::should_forward_message,
};

/// Handles the message event
///
/// Prefix commands come first. Remaining DMs are relayed to the author's modmail
/// case; guild messages are relayed from open case channels or forwarded from
/// support forum threads.
pub async fn handle_message(
    db: &DatabaseConnection,
    config: &Config,
    http_client: &reqwest::Client,
    ctx: Context,
    msg: Message,
) {
    if msg.author.bot {
        return;
    }

    if prefix::dispatch(db, config, &ctx, &msg).await {
        return;
    }

    if msg.guild_id.is_none() {
        if let Err(e) = modmail::relay_from_user(db, config, &ctx, &msg).await {
            tracing::error!("Failed to relay DM of {}: {}", msg.author.id, e);
        }
        return;
    }

    let channel = match msg.channel_id.to_channel(&ctx).await {
        Ok(channel) => channel.guild(),
        Err(e) => {
            tracing::debug!("Failed to resolve channel {}: {:?}", msg.channel_id, e);
            return;
        }
    };
    let Some(channel) = channel else {
        return;
    };

    if is_support_thread(config, &channel) {
        if should_forward_message(msg.id.get(), channel.id.get(), msg.author.bot) {
            forward_message(config, http_client, &channel, &msg).await;
        }
        return;
    }

    if let Err(e) = modmail::relay_from_team(config, &ctx, &msg, &channel.name).await {
        tracing::error!("Failed to relay team message in {}: {}", channel.name, e);
    }
}
