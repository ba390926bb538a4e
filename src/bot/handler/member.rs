use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, Context, CreateMessage, GuildMemberUpdateEvent, Member};

use crate::{
    bot::directory::SerenityRoleDirectory,
    config::Config,
    error::role_sync::RoleSyncError,
    model::role_category::ReconcileOutcome,
    service::{
        greeting::{alt_alert_message, classify_account, welcome_embed},
        role_category::RoleCategoryService,
    },
};

/// Handles the guild_member_addition event when a member joins a guild
///
/// Posts the welcome embed and, for human accounts, the anti-alt check.
pub async fn handle_guild_member_addition(config: &Config, ctx: Context, new_member: Member) {
    let user = &new_member.user;

    match config.greeting.welcome_channel_id {
        Some(channel_id) => {
            let message = CreateMessage::new().embed(welcome_embed(user.id.get(), user.avatar_url()));
            if let Err(e) = ChannelId::new(channel_id)
                .send_message(&ctx.http, message)
                .await
            {
                tracing::error!("Failed to send welcome message for {}: {:?}", user.id, e);
            }
        }
        None => tracing::debug!("No welcome channel configured, skipping welcome for {}", user.id),
    }

    if user.bot {
        return;
    }

    let created_at = DateTime::<Utc>::from_timestamp(user.id.created_at().unix_timestamp(), 0)
        .unwrap_or_else(Utc::now);
    let reasons = classify_account(created_at, user.avatar.is_some(), Utc::now());
    if reasons.is_empty() {
        return;
    }

    let Some(channel_id) = config.greeting.team_channel_id else {
        tracing::warn!("Possible alt account {} joined but no team channel is configured", user.id);
        return;
    };

    let message = alt_alert_message(user.id.get(), &reasons, config.greeting.team_ping_role_id);
    if let Err(e) = ChannelId::new(channel_id).send_message(&ctx.http, message).await {
        tracing::error!("Failed to send alt alert for {}: {:?}", user.id, e);
    } else {
        tracing::info!("Flagged possible alt account {}: {:?}", user.id, reasons);
    }
}

/// Handles the guild_member_update event when a member's roles or profile change
///
/// Runs the role-category reconciler. The gateway's `old` member is only present when
/// the member was cached; without it the reconciler always runs.
pub async fn handle_guild_member_update(
    config: &Config,
    ctx: Context,
    old: Option<Member>,
    new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    if !config.role_category.is_enabled() {
        return;
    }

    let guild_id = event.guild_id.get();
    let user_id = event.user.id.get();
    let before: Option<Vec<u64>> =
        old.map(|member| member.roles.iter().map(|role| role.get()).collect());
    let after: Vec<u64> = match new {
        Some(member) => member.roles.iter().map(|role| role.get()).collect(),
        None => event.roles.iter().map(|role| role.get()).collect(),
    };

    let directory = SerenityRoleDirectory::new(&ctx);
    let service = RoleCategoryService::new(&directory, &config.role_category);

    match service
        .on_member_update(guild_id, user_id, before.as_deref(), &after)
        .await
    {
        Ok(ReconcileOutcome::Unchanged) => {}
        Ok(ReconcileOutcome::Applied { added, removed }) => tracing::debug!(
            "Updated category roles of {} in {}: added {:?}, removed {:?}",
            user_id,
            guild_id,
            added,
            removed
        ),
        Err(RoleSyncError::PermissionDenied(e)) => tracing::warn!(
            "Cannot update category roles of {} in {}: {}",
            user_id,
            guild_id,
            e
        ),
        Err(e) => tracing::error!(
            "Failed to update category roles of {} in {}: {}",
            user_id,
            guild_id,
            e
        ),
    }
}
