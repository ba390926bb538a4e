//! Modmail: DM conversations between a user and the team, bridged through a channel
//! in the support guild.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, ChannelType, Colour, Context, CreateChannel, CreateEmbed, CreateEmbedAuthor,
    CreateMessage, EditChannel, GuildId, Message, UserId,
};
use serenity::http::HttpError;

use crate::{
    config::Config,
    error::AppError,
    model::modmail::ModmailCase,
    service::modmail::{
        attachment_list, closed_channel_name, is_case_channel, is_inline_image, is_open_channel,
        open_channel_name, orphan_closed_channel_name, user_id_from_channel_name, ModmailService,
    },
};

const NOT_CONFIGURED: &str = "❌ Modmail is not set up on this server yet.";

fn support_guild(config: &Config) -> Result<(GuildId, ChannelId), AppError> {
    match (config.guild_id, config.modmail.category_id) {
        (Some(guild_id), Some(category_id)) => {
            Ok((GuildId::new(guild_id), ChannelId::new(category_id)))
        }
        _ => Err(AppError::BadRequest(NOT_CONFIGURED.to_string())),
    }
}

/// `t!m` in DMs: opens a case channel for the author.
pub async fn open(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    if msg.guild_id.is_some() {
        msg.reply(&ctx.http, "📫 Please send me `t!m` in a direct message.")
            .await?;
        return Ok(());
    }

    let (guild_id, category_id) = support_guild(config)?;
    let service = ModmailService::new(db);
    let user_id = msg.author.id.get();

    if service.case_for_user(user_id).await?.is_some() {
        msg.reply(
            &ctx.http,
            "⚠️ You already have an open case. Just write here to reach the team.",
        )
        .await?;
        return Ok(());
    }

    let channel = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(open_channel_name(msg.author.display_name(), user_id))
                .kind(ChannelType::Text)
                .category(category_id)
                .topic(format!(
                    "Modmail case of {} ({})",
                    msg.author.name, user_id
                )),
        )
        .await?;

    service.open(user_id, channel.id.get()).await?;

    channel
        .send_message(
            &ctx.http,
            CreateMessage::new().content(format!(
                "📬 New modmail case from <@{}>. Messages written here are forwarded to them.",
                user_id
            )),
        )
        .await?;
    msg.reply(
        &ctx.http,
        "✅ Your case has been opened. Write your messages here and the team will answer you.",
    )
    .await?;

    tracing::info!("Opened modmail case for {} in {}", user_id, channel.id);

    Ok(())
}

/// Archives a case channel: renames it to `deleted-…` and moves it to the closed category.
async fn archive_channel(
    ctx: &Context,
    config: &Config,
    channel_id: ChannelId,
    name: String,
) -> Result<(), AppError> {
    let mut builder = EditChannel::new().name(name);
    if let Some(closed_category_id) = config.modmail.closed_category_id {
        builder = builder.category(Some(ChannelId::new(closed_category_id)));
    }

    channel_id.edit(&ctx.http, builder).await?;

    Ok(())
}

async fn notify_user(ctx: &Context, user_id: UserId, content: &str) {
    if let Err(e) = user_id
        .direct_message(&ctx.http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Failed to DM modmail user {}: {:?}", user_id, e);
    }
}

async fn display_name(ctx: &Context, user_id: UserId) -> String {
    match user_id.to_user(&ctx.http).await {
        Ok(user) => user.display_name().to_string(),
        Err(_) => user_id.to_string(),
    }
}

/// `t!c`: closes the author's case in DMs, or the case of the channel it is used in.
pub async fn close(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let service = ModmailService::new(db);

    let Some(guild_id) = msg.guild_id else {
        let Some(case) = service.close(msg.author.id.get()).await? else {
            msg.reply(&ctx.http, "❌ You have no open case.").await?;
            return Ok(());
        };

        archive_channel(
            ctx,
            config,
            ChannelId::new(case.channel_id),
            closed_channel_name(msg.author.display_name(), case.user_id),
        )
        .await?;
        msg.reply(&ctx.http, "✅ Your case has been closed.").await?;
        tracing::info!("Modmail case of {} closed by the user", case.user_id);
        return Ok(());
    };

    if config.guild_id != Some(guild_id.get()) {
        return Ok(());
    }

    let channel_name = match msg.channel_id.to_channel(&ctx.http).await?.guild() {
        Some(channel) => channel.name,
        None => return Ok(()),
    };
    if !is_open_channel(&channel_name) {
        msg.reply(&ctx.http, "❌ This is not an open modmail channel.")
            .await?;
        return Ok(());
    }

    let closed = match user_id_from_channel_name(&channel_name) {
        Some(user_id) => service.close(user_id).await?,
        None => None,
    };

    match closed {
        Some(case) => {
            let user_id = UserId::new(case.user_id);
            let name = display_name(ctx, user_id).await;
            archive_channel(ctx, config, msg.channel_id, closed_channel_name(&name, case.user_id))
                .await?;
            notify_user(ctx, user_id, "🔒 Your modmail case was closed by the team.").await;
            tracing::info!("Modmail case of {} closed by {}", case.user_id, msg.author.id);
        }
        None => {
            archive_channel(ctx, config, msg.channel_id, orphan_closed_channel_name(&channel_name))
                .await?;
        }
    }

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().content("🔒 Case closed."))
        .await?;

    Ok(())
}

/// `t!del`: closes any case behind the channel and deletes it.
pub async fn delete(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    if msg.guild_id.map(GuildId::get) != config.guild_id || config.guild_id.is_none() {
        return Ok(());
    }

    let channel_name = match msg.channel_id.to_channel(&ctx.http).await?.guild() {
        Some(channel) => channel.name,
        None => return Ok(()),
    };
    if !is_case_channel(&channel_name) {
        msg.reply(&ctx.http, "❌ This command only works in modmail channels.")
            .await?;
        return Ok(());
    }

    if let Some(user_id) = user_id_from_channel_name(&channel_name) {
        if ModmailService::new(db).close(user_id).await?.is_some() {
            notify_user(
                ctx,
                UserId::new(user_id),
                "🔒 Your modmail case was closed and deleted by the team.",
            )
            .await;
        }
    }

    msg.channel_id.delete(&ctx.http).await?;
    tracing::info!("Modmail channel {} deleted by {}", channel_name, msg.author.id);

    Ok(())
}

fn is_unknown_channel(err: &AppError) -> bool {
    match err {
        AppError::DiscordErr(e) => matches!(
            e.as_ref(),
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
                if response.status_code.as_u16() == 404
        ),
        _ => false,
    }
}

fn relay_embed(msg: &Message, title: &str, colour: Colour) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(msg.author.display_name()).icon_url(msg.author.face()))
        .title(title)
        .description(msg.content.clone())
        .colour(colour)
        .timestamp(msg.timestamp);

    if !msg.attachments.is_empty() {
        embed = embed.field(
            "Attachments",
            attachment_list(
                msg.attachments
                    .iter()
                    .map(|attachment| (attachment.filename.as_str(), attachment.url.as_str())),
            ),
            false,
        );
    }

    match msg
        .attachments
        .iter()
        .find(|attachment| is_inline_image(attachment.content_type.as_deref()))
    {
        Some(image) => embed.image(image.url.clone()),
        None => embed,
    }
}

async fn relay_to_case(ctx: &Context, case: &ModmailCase, msg: &Message) -> Result<(), AppError> {
    ChannelId::new(case.channel_id)
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(relay_embed(msg, "📨 New message", Colour::BLUE)),
        )
        .await?;

    Ok(())
}

/// Forwards a DM to the author's case channel.
pub async fn relay_from_user(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let service = ModmailService::new(db);

    let Some(case) = service.case_for_user(msg.author.id.get()).await? else {
        msg.reply(
            &ctx.http,
            format!(
                "👋 Need help from the team? Send `{}m` to open a modmail case.",
                config.command_prefix
            ),
        )
        .await?;
        return Ok(());
    };

    match relay_to_case(ctx, &case, msg).await {
        Ok(()) => {
            msg.react(&ctx.http, '✅').await?;
        }
        Err(e) if is_unknown_channel(&e) => {
            tracing::info!(
                "Case channel {} of {} is gone, closing the case",
                case.channel_id,
                case.user_id
            );
            service.close(case.user_id).await?;
            msg.reply(
                &ctx.http,
                format!(
                    "⚠️ Your case was closed by the team. Send `{}m` to open a new one.",
                    config.command_prefix
                ),
            )
            .await?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Forwards a team message written in an open case channel to the user.
pub async fn relay_from_team(
    config: &Config,
    ctx: &Context,
    msg: &Message,
    channel_name: &str,
) -> Result<(), AppError> {
    if msg.guild_id.map(GuildId::get) != config.guild_id || !is_open_channel(channel_name) {
        return Ok(());
    }
    let Some(user_id) = user_id_from_channel_name(channel_name) else {
        return Ok(());
    };

    let delivered = UserId::new(user_id)
        .direct_message(
            &ctx.http,
            CreateMessage::new().embed(relay_embed(msg, "💬 Answer from the team", Colour::DARK_GREEN)),
        )
        .await;

    match delivered {
        Ok(_) => {
            msg.react(&ctx.http, '✔').await?;
        }
        Err(e) => {
            tracing::warn!("Failed to deliver modmail answer to {}: {:?}", user_id, e);
            msg.reply(
                &ctx.http,
                "❌ The message could not be delivered. The user may have DMs disabled.",
            )
            .await?;
        }
    }

    Ok(())
}
