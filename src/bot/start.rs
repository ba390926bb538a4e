use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents, Http, ShardManager};
use serenity::prelude::TypeMapKey;

use crate::{bot::handler::Handler, config::Config, error::AppError};

/// Shard manager stored in the client data so `/ping` can read gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Builds the Discord client without connecting it.
///
/// The returned HTTP client is shared with the callback server.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection for the bot handlers
/// - `http_client` - Client used for outgoing webhook requests
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its HTTP handle
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(
    config: Arc<Config>,
    db: DatabaseConnection,
    http_client: reqwest::Client,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let handler = Handler::new(db, config.clone(), http_client);

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    client
        .data
        .write()
        .await
        .insert::<ShardManagerContainer>(client.shard_manager.clone());

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the bot and runs until the gateway connection ends.
///
/// Should be called from within a spawned task since it blocks until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
