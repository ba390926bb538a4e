//! Ready event handler.
//!
//! Fired once per gateway connection after the handshake. Sets the presence shown to
//! members and registers the global slash commands so new commands are available
//! after every deploy.

use serenity::all::{ActivityData, Context, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("📫 DM for support")));

    match command::register(&ctx.http).await {
        Ok(commands) => tracing::info!("Registered {} global commands", commands.len()),
        Err(e) => tracing::error!("Failed to register global commands: {:?}", e),
    }
}
