use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, Guild, GuildChannel, GuildMemberUpdateEvent, Interaction, Member,
    Message, PartialGuild, Ready, VoiceState,
};
use serenity::async_trait;

use crate::{bot::interaction, config::Config};

pub mod guild;
pub mod member;
pub mod message;
pub mod ready;
pub mod thread;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    /// Client for the support forum webhook
    pub http_client: reqwest::Client,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<Config>, http_client: reqwest::Client) -> Self {
        Self {
            db,
            config,
            http_client,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.config, ctx, new_member).await;
    }

    /// Called when a member is updated in a guild (roles, nickname, etc.)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        member::handle_guild_member_update(&self.config, ctx, old, new, event).await;
    }

    /// Called when guild settings change, including the boost count
    async fn guild_update(
        &self,
        ctx: Context,
        old_data_if_available: Option<Guild>,
        new_data: PartialGuild,
    ) {
        guild::handle_guild_update(&self.config, ctx, old_data_if_available, new_data).await;
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.db, ctx, old, new).await;
    }

    /// Called when a message is sent in a channel or DM
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.db, &self.config, &self.http_client, ctx, message).await;
    }

    /// Called when a thread is created, including new forum posts
    async fn thread_create(&self, ctx: Context, thread: GuildChannel) {
        thread::handle_thread_create(&self.config, &self.http_client, ctx, thread).await;
    }

    /// Called for slash commands, components and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.db, &self.config, ctx, interaction).await;
    }
}
