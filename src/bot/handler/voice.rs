//! Temporary voice channels.
//!
//! Joining the hub channel spawns a voice channel owned by the member plus a private
//! interface channel with its controls. Both are removed once the voice channel is
//! empty again.

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, ChannelType, Context, CreateChannel, GuildId, Member, VoiceState};

use crate::{
    bot::interaction::temp_voice::{ensure_category, interface_message},
    error::{role_sync::is_permission_error, AppError},
    model::temp_voice::TempVoiceSession,
    service::temp_voice::{
        interface_channel_name, interface_overwrites, is_temp_voice_channel, voice_channel_name,
        TempVoiceService,
    },
};

/// Handles the voice_state_update event
pub async fn handle_voice_state_update(
    db: &DatabaseConnection,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let previous = old.and_then(|state| state.channel_id);
    // Mute and deafen updates keep the channel
    if previous == new.channel_id {
        return;
    }

    if let Some(channel_id) = previous {
        if let Err(e) = cleanup_if_empty(db, &ctx, guild_id, channel_id).await {
            log_error("clean up temporary channel", channel_id, &e);
        }
    }

    let Some(joined) = new.channel_id else {
        return;
    };

    match TempVoiceService::new(db).is_hub(guild_id.get(), joined.get()).await {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => {
            tracing::error!("Failed to look up temp voice hub of {}: {}", guild_id, e);
            return;
        }
    }

    let Some(member) = new.member else {
        tracing::warn!("Member joined the hub in {} without member data", guild_id);
        return;
    };

    if let Err(e) = spawn_channel(db, &ctx, guild_id, &member).await {
        log_error("create temporary channel for", joined, &e);
    }
}

fn log_error(action: &str, channel_id: ChannelId, err: &AppError) {
    match err {
        AppError::DiscordErr(e) if is_permission_error(e) => {
            tracing::warn!("Missing permission to {} {}: {}", action, channel_id, e)
        }
        e => tracing::error!("Failed to {} {}: {}", action, channel_id, e),
    }
}

/// Creates the member's voice channel and interface, then moves the member in.
async fn spawn_channel(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: GuildId,
    member: &Member,
) -> Result<(), AppError> {
    let bot_id = ctx.cache.current_user().id.get();
    let username = member.user.name.clone();
    let category_id = ensure_category(ctx, guild_id).await?;

    let voice = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(voice_channel_name(&username))
                .kind(ChannelType::Voice)
                .category(category_id),
        )
        .await?;

    guild_id
        .move_member(&ctx.http, member.user.id, voice.id)
        .await?;

    let interface = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(interface_channel_name(&username))
                .kind(ChannelType::Text)
                .category(category_id)
                .permissions(interface_overwrites(
                    guild_id.get(),
                    member.user.id.get(),
                    bot_id,
                )),
        )
        .await?;

    let session = TempVoiceService::new(db)
        .open_session(TempVoiceSession {
            voice_channel_id: voice.id.get(),
            guild_id: guild_id.get(),
            owner_id: member.user.id.get(),
            interface_channel_id: interface.id.get(),
        })
        .await?;

    interface
        .send_message(&ctx.http, interface_message(&session))
        .await?;

    tracing::info!("Created temporary voice channel {} for {}", voice.id, member.user.id);

    Ok(())
}

/// Deletes a temporary channel, its interface and its session once nobody is left in it.
async fn cleanup_if_empty(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> Result<(), AppError> {
    let cached = ctx.cache.guild(guild_id).map(|guild| {
        let name = guild.channels.get(&channel_id).map(|channel| channel.name.clone());
        let members = guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .count();
        (name, members)
    });

    let Some((Some(name), 0)) = cached else {
        return Ok(());
    };
    if !is_temp_voice_channel(&name) {
        return Ok(());
    }

    channel_id.delete(&ctx.http).await?;

    if let Some(session) = TempVoiceService::new(db).end_session(channel_id.get()).await? {
        ChannelId::new(session.interface_channel_id)
            .delete(&ctx.http)
            .await?;
    }

    tracing::info!("Deleted empty temporary voice channel {}", name);

    Ok(())
}
