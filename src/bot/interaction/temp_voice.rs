//! Temporary voice hub command and the owner interface.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, ChannelType, Colour, CommandInteraction, ComponentInteraction,
    Context, CreateActionRow, CreateButton, CreateChannel, CreateEmbed, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, CreateModal, EditChannel, GuildId,
    InputTextStyle, ModalInteraction,
};

use crate::{
    bot::{
        custom_id::{self, input},
        interaction::{ephemeral, modal_value, option, NO_PERMISSION},
    },
    config::Config,
    error::AppError,
    model::temp_voice::TempVoiceSession,
    service::temp_voice::{
        interface_state, parse_channel_name, parse_user_limit, InterfaceState,
        TempVoiceService, VoiceToggle, TEMP_VOICE_CATEGORY,
    },
};

/// Finds the `TempVoices` category, creating it when missing.
pub async fn ensure_category(ctx: &Context, guild_id: GuildId) -> Result<ChannelId, AppError> {
    let channels = guild_id.channels(&ctx.http).await?;

    if let Some(category) = channels
        .values()
        .find(|channel| channel.kind == ChannelType::Category && channel.name == TEMP_VOICE_CATEGORY)
    {
        return Ok(category.id);
    }

    let category = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(TEMP_VOICE_CATEGORY).kind(ChannelType::Category),
        )
        .await?;

    tracing::info!("Created {} category in guild {}", TEMP_VOICE_CATEGORY, guild_id);

    Ok(category.id)
}

/// Interface buttons; each toggle pair has exactly one enabled button.
pub fn interface_components(state: InterfaceState) -> Vec<CreateActionRow> {
    vec![
        CreateActionRow::Buttons(vec![
            CreateButton::new(custom_id::TEMPVOICE_LOCK)
                .label("Lock")
                .style(ButtonStyle::Danger)
                .emoji('🚫')
                .disabled(state.locked),
            CreateButton::new(custom_id::TEMPVOICE_UNLOCK)
                .label("Unlock")
                .style(ButtonStyle::Success)
                .emoji('🔓')
                .disabled(!state.locked),
            CreateButton::new(custom_id::TEMPVOICE_HIDE)
                .label("Hide")
                .style(ButtonStyle::Danger)
                .emoji('🌙')
                .disabled(state.hidden),
            CreateButton::new(custom_id::TEMPVOICE_SHOW)
                .label("Show")
                .style(ButtonStyle::Success)
                .emoji('🔍')
                .disabled(!state.hidden),
        ]),
        CreateActionRow::Buttons(vec![
            CreateButton::new(custom_id::TEMPVOICE_RENAME)
                .label("Rename")
                .style(ButtonStyle::Primary)
                .emoji('📝'),
            CreateButton::new(custom_id::TEMPVOICE_LIMIT)
                .label("Change limit")
                .style(ButtonStyle::Primary)
                .emoji('🎚'),
        ]),
    ]
}

pub fn interface_message(session: &TempVoiceSession) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("TempVoice Interface")
        .description(format!(
            "Manage your channel <#{}> with the buttons below. Only <@{}> can use them.",
            session.voice_channel_id, session.owner_id
        ))
        .colour(Colour::BLURPLE);

    CreateMessage::new()
        .content(format!("<@{}>", session.owner_id))
        .embed(embed)
        .components(interface_components(InterfaceState::default()))
}

/// Loads the session controlled from `interface_channel_id`, refusing anyone but its owner.
async fn owned_session(
    db: &DatabaseConnection,
    interface_channel_id: ChannelId,
    user_id: u64,
) -> Result<TempVoiceSession, AppError> {
    let session = TempVoiceService::new(db)
        .session_for_interface(interface_channel_id.get())
        .await?
        .ok_or_else(|| {
            AppError::NotFound("❌ This interface has no active voice channel.".to_string())
        })?;

    if session.owner_id != user_id {
        return Err(AppError::BadRequest(
            "❌ Only the channel owner can change this.".to_string(),
        ));
    }

    Ok(session)
}

/// `/tempvoice <channel>`: sets the hub channel of the guild.
pub async fn set_hub(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    if !config.is_owner(command.user.id.get()) {
        command
            .create_response(&ctx.http, ephemeral(NO_PERMISSION))
            .await?;
        return Ok(());
    }

    let (Some(guild_id), Some(channel_id)) = (
        command.guild_id,
        option(command, "channel").and_then(|value| value.as_channel_id()),
    ) else {
        command
            .create_response(
                &ctx.http,
                ephemeral("❌ This command can only be used on a server."),
            )
            .await?;
        return Ok(());
    };

    TempVoiceService::new(db)
        .set_hub(guild_id.get(), channel_id.get())
        .await?;
    ensure_category(ctx, guild_id).await?;

    tracing::info!("Temp voice hub of guild {} set to {}", guild_id, channel_id);

    command
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ <#{}> is now the temp voice hub.", channel_id)),
        )
        .await?;

    Ok(())
}

pub async fn toggle(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    base: &str,
) -> Result<(), AppError> {
    let toggle = match base {
        custom_id::TEMPVOICE_LOCK => VoiceToggle::Lock,
        custom_id::TEMPVOICE_UNLOCK => VoiceToggle::Unlock,
        custom_id::TEMPVOICE_HIDE => VoiceToggle::Hide,
        _ => VoiceToggle::Show,
    };

    let session = owned_session(db, component.channel_id, component.user.id.get()).await?;
    let voice_channel_id = ChannelId::new(session.voice_channel_id);
    let channel = voice_channel_id
        .to_channel(&ctx.http)
        .await?
        .guild()
        .ok_or_else(|| AppError::NotFound("❌ The voice channel no longer exists.".to_string()))?;

    voice_channel_id
        .create_permission(
            &ctx.http,
            toggle.everyone_overwrite(&channel.permission_overwrites, session.guild_id),
        )
        .await?;

    let state = toggle.apply(interface_state(
        &channel.permission_overwrites,
        session.guild_id,
    ));

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new().components(interface_components(state)),
            ),
        )
        .await?;

    component
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(toggle.confirmation())
                .ephemeral(true),
        )
        .await?;

    Ok(())
}

pub async fn open_modal(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    base: &str,
) -> Result<(), AppError> {
    owned_session(db, component.channel_id, component.user.id.get()).await?;

    let modal = if base == custom_id::TEMPVOICE_RENAME {
        CreateModal::new(custom_id::TEMPVOICE_RENAME_MODAL, "Rename channel").components(vec![
            CreateActionRow::InputText(
                CreateInputText::new(InputTextStyle::Short, "New channel name", input::VALUE)
                    .max_length(100)
                    .required(true),
            ),
        ])
    } else {
        CreateModal::new(custom_id::TEMPVOICE_LIMIT_MODAL, "Change user limit").components(vec![
            CreateActionRow::InputText(
                CreateInputText::new(InputTextStyle::Short, "New user limit (0-99)", input::VALUE)
                    .max_length(2)
                    .required(true),
            ),
        ])
    };

    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

pub async fn rename(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let session = owned_session(db, modal.channel_id, modal.user.id.get()).await?;
    let name = parse_channel_name(&modal_value(modal, input::VALUE)).map_err(AppError::BadRequest)?;

    ChannelId::new(session.voice_channel_id)
        .edit(&ctx.http, EditChannel::new().name(&name))
        .await?;

    modal
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ The channel was renamed to **{}**.", name)),
        )
        .await?;

    Ok(())
}

pub async fn limit(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let session = owned_session(db, modal.channel_id, modal.user.id.get()).await?;
    let limit = parse_user_limit(&modal_value(modal, input::VALUE)).map_err(AppError::BadRequest)?;

    ChannelId::new(session.voice_channel_id)
        .edit(&ctx.http, EditChannel::new().user_limit(limit))
        .await?;

    modal
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ The user limit was set to **{}**.", limit)),
        )
        .await?;

    Ok(())
}
