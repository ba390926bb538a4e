//! Ticket panel, lifecycle buttons and the member slash commands.

use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, ChannelType, Colour, CommandInteraction, ComponentInteraction,
    Context, CreateActionRow, CreateButton, CreateChannel, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditChannel,
    EditInteractionResponse, EditMessage, Permissions, RoleId,
};

use crate::{
    bot::{
        custom_id,
        interaction::{
            ephemeral, has_permission, member_permissions, option, public, selected_value,
            NO_PERMISSION,
        },
    },
    config::Config,
    error::AppError,
    model::ticket::TicketKind,
    service::ticket::{
        channel_name, closing_overwrites, is_ticket_channel, member_access, member_denied,
        opening_overwrites, reopening_overwrites, ClaimOutcome, TicketService,
    },
};

/// Delay between confirming deletion and removing the channel.
const DELETE_DELAY: Duration = Duration::from_secs(5);

const NOT_A_TICKET: &str = "❌ This channel is not a ticket.";

pub fn panel_message() -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("🎫 Support tickets")
        .description(
            "Need help from the team? Choose a reason below and a private ticket channel will be created for you.",
        )
        .colour(Colour::BLUE);

    CreateMessage::new()
        .embed(embed)
        .components(vec![select_row()])
}

fn select_row() -> CreateActionRow {
    let options = TicketKind::ALL
        .iter()
        .map(|kind| {
            CreateSelectMenuOption::new(kind.label(), kind.value())
                .description(kind.summary())
                .emoji(kind.emoji())
        })
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(custom_id::TICKET_SELECT, CreateSelectMenuKind::String { options })
            .placeholder("Choose a reason"),
    )
}

fn open_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::TICKET_CLOSE)
            .label("Close")
            .style(ButtonStyle::Danger)
            .emoji('🔒'),
        CreateButton::new(custom_id::TICKET_CLAIM)
            .label("Claim")
            .style(ButtonStyle::Success)
            .emoji('🙋'),
    ])
}

fn closed_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::TICKET_REOPEN)
            .label("Reopen")
            .style(ButtonStyle::Success)
            .emoji('🔓'),
        CreateButton::new(custom_id::TICKET_DELETE)
            .label("Delete")
            .style(ButtonStyle::Danger)
            .emoji('🗑'),
    ])
}

/// Ticket buttons are reserved for members who can manage messages.
async fn ensure_team(ctx: &Context, component: &ComponentInteraction) -> Result<bool, AppError> {
    if has_permission(member_permissions(component), Permissions::MANAGE_MESSAGES) {
        return Ok(true);
    }

    component
        .create_response(&ctx.http, ephemeral(NO_PERMISSION))
        .await?;

    Ok(false)
}

async fn move_to_category(
    ctx: &Context,
    channel_id: ChannelId,
    category_id: Option<u64>,
) -> Result<(), AppError> {
    let Some(category_id) = category_id else {
        tracing::warn!(
            "Ticket category not configured, leaving channel {} in place",
            channel_id
        );
        return Ok(());
    };

    channel_id
        .edit(
            &ctx.http,
            EditChannel::new().category(Some(ChannelId::new(category_id))),
        )
        .await?;

    Ok(())
}

/// Clears the panel's select so the same reason can be picked again.
async fn reset_panel(ctx: &Context, component: &ComponentInteraction) {
    let builder = EditMessage::new().components(vec![select_row()]);

    if let Err(e) = component
        .channel_id
        .edit_message(&ctx.http, component.message.id, builder)
        .await
    {
        tracing::debug!("Failed to reset ticket panel: {:?}", e);
    }
}

/// Opens a ticket for the reason picked in the panel.
pub async fn open(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(kind) = selected_value(component).and_then(TicketKind::from_value) else {
        component
            .create_response(&ctx.http, ephemeral("❌ Unknown ticket type."))
            .await?;
        return Ok(());
    };
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };

    let service = TicketService::new(db);
    let user_id = component.user.id.get();

    if let Some(existing) = service.active_ticket(user_id).await? {
        component
            .create_response(
                &ctx.http,
                ephemeral(format!(
                    "❌ You already have an open ticket: <#{}>",
                    existing.channel_id
                )),
            )
            .await?;
        reset_panel(ctx, component).await;
        return Ok(());
    }

    let Some(category_id) = config.ticket.open_category_id else {
        tracing::warn!("TICKET_OPEN_CATEGORY_ID is not set, cannot open ticket");
        component
            .create_response(
                &ctx.http,
                ephemeral("❌ Tickets are not set up yet. Please contact the team."),
            )
            .await?;
        return Ok(());
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let routing = kind.routing(&config.ticket.team);
    let access_roles: Vec<u64> = config
        .ticket
        .team
        .all_tickets
        .into_iter()
        .chain(routing.access_roles.iter().copied())
        .collect();
    let bot_id = ctx.cache.current_user().id.get();

    let builder = CreateChannel::new(channel_name(kind, &component.user.name))
        .kind(ChannelType::Text)
        .category(ChannelId::new(category_id))
        .permissions(opening_overwrites(
            guild_id.get(),
            user_id,
            bot_id,
            &access_roles,
        ));
    let channel = guild_id.create_channel(&ctx.http, builder).await?;

    service.register(channel.id.get(), user_id).await?;

    let display_name = component
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| component.user.name.clone());

    let mut mentions = format!("<@{}>", user_id);
    if let Some(role_id) = routing.ping_role {
        mentions.push_str(&format!(" <@&{}>", role_id));
    }

    let intro = CreateEmbed::new()
        .title(kind.title(&display_name))
        .description(kind.prompt())
        .colour(Colour::BLUE);

    channel
        .id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(mentions)
                .embed(intro)
                .components(vec![open_buttons()]),
        )
        .await?;

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .content(format!("✅ Your ticket was created: <#{}>", channel.id)),
        )
        .await?;

    reset_panel(ctx, component).await;

    tracing::info!(
        "Opened {} ticket {} for user {}",
        kind.value(),
        channel.id,
        user_id
    );

    Ok(())
}

pub async fn claim(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    if !ensure_team(ctx, component).await? {
        return Ok(());
    }

    let invoker = component.user.id.get();
    let outcome = TicketService::new(db)
        .toggle_claim(component.channel_id.get(), invoker)
        .await?;

    let response = match outcome {
        ClaimOutcome::Claimed(_) => {
            move_to_category(ctx, component.channel_id, config.ticket.claimed_category_id)
                .await?;
            public(format!("🙋 <@{}> claimed this ticket.", invoker))
        }
        ClaimOutcome::Released(_) => {
            move_to_category(ctx, component.channel_id, config.ticket.open_category_id).await?;
            public(format!("↩️ <@{}> released this ticket.", invoker))
        }
        ClaimOutcome::ClaimedByOther(owner) => ephemeral(format!(
            "❌ This ticket was already claimed by <@{}>.",
            owner
        )),
    };

    component.create_response(&ctx.http, response).await?;

    Ok(())
}

pub async fn close(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    if !ensure_team(ctx, component).await? {
        return Ok(());
    }

    let service = TicketService::new(db);
    let Some(ticket) = service.get(component.channel_id.get()).await? else {
        component
            .create_response(&ctx.http, ephemeral(NOT_A_TICKET))
            .await?;
        return Ok(());
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await?;

    let channel = component
        .channel_id
        .to_channel(&ctx.http)
        .await?
        .guild()
        .ok_or_else(|| AppError::NotFound(NOT_A_TICKET.to_string()))?;
    let bot_id = ctx.cache.current_user().id.get();

    for overwrite in closing_overwrites(
        &channel.permission_overwrites,
        ticket.user_id,
        bot_id,
        &config.ticket.team.all(),
    ) {
        component
            .channel_id
            .create_permission(&ctx.http, overwrite)
            .await?;
    }

    service.close(ticket.channel_id).await?;
    move_to_category(ctx, component.channel_id, config.ticket.closed_category_id).await?;

    let embed = CreateEmbed::new()
        .title("🔒 Ticket closed")
        .description(format!(
            "Closed by <@{}>. The team can reopen or delete this ticket.",
            component.user.id
        ))
        .colour(Colour::RED);

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(embed)
                .components(vec![closed_buttons()]),
        )
        .await?;

    tracing::info!("Closed ticket {}", ticket.channel_id);

    Ok(())
}

pub async fn reopen(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    if !ensure_team(ctx, component).await? {
        return Ok(());
    }

    let service = TicketService::new(db);
    let Some(ticket) = service.get(component.channel_id.get()).await? else {
        component
            .create_response(&ctx.http, ephemeral(NOT_A_TICKET))
            .await?;
        return Ok(());
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await?;

    let channel = component
        .channel_id
        .to_channel(&ctx.http)
        .await?
        .guild()
        .ok_or_else(|| AppError::NotFound(NOT_A_TICKET.to_string()))?;
    let bot_id = ctx.cache.current_user().id.get();

    for overwrite in reopening_overwrites(
        &channel.permission_overwrites,
        ticket.user_id,
        bot_id,
        &config.ticket.team.all(),
    ) {
        component
            .channel_id
            .create_permission(&ctx.http, overwrite)
            .await?;
    }

    service.reopen(ticket.channel_id).await?;
    move_to_category(ctx, component.channel_id, config.ticket.open_category_id).await?;

    let embed = CreateEmbed::new()
        .title("🔓 Ticket reopened")
        .description(format!("Reopened by <@{}>.", component.user.id))
        .colour(Colour::DARK_GREEN);

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(embed)
                .components(vec![open_buttons()]),
        )
        .await?;

    tracing::info!("Reopened ticket {}", ticket.channel_id);

    Ok(())
}

pub async fn request_delete(ctx: &Context, component: &ComponentInteraction) -> Result<(), AppError> {
    if !ensure_team(ctx, component).await? {
        return Ok(());
    }

    let buttons = CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::TICKET_DELETE_CONFIRM)
            .label("Delete")
            .style(ButtonStyle::Danger),
        CreateButton::new(custom_id::TICKET_DELETE_CANCEL)
            .label("Cancel")
            .style(ButtonStyle::Secondary),
    ]);

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("⚠️ Do you really want to delete this ticket?")
                    .components(vec![buttons]),
            ),
        )
        .await?;

    Ok(())
}

pub async fn confirm_delete(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    if !ensure_team(ctx, component).await? {
        return Ok(());
    }

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("🗑️ This ticket will be deleted in 5 seconds.")
                    .components(vec![]),
            ),
        )
        .await?;

    if !TicketService::new(db)
        .delete(component.channel_id.get())
        .await?
    {
        tracing::debug!(
            "Deleting channel {} without a stored ticket",
            component.channel_id
        );
    }

    tokio::time::sleep(DELETE_DELAY).await;

    component.channel_id.delete(&ctx.http).await?;

    tracing::info!("Deleted ticket {}", component.channel_id);

    Ok(())
}

pub async fn cancel_delete(ctx: &Context, component: &ComponentInteraction) -> Result<(), AppError> {
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("Deletion cancelled.")
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

async fn in_ticket_channel(ctx: &Context, command: &CommandInteraction) -> Result<bool, AppError> {
    let channel = command.channel_id.to_channel(&ctx.http).await?;

    Ok(channel
        .guild()
        .is_some_and(|channel| is_ticket_channel(&channel.name)))
}

pub async fn add_member(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let Some(user_id) = option(command, "member").and_then(|value| value.as_user_id()) else {
        command
            .create_response(&ctx.http, ephemeral("❌ Please choose a member."))
            .await?;
        return Ok(());
    };

    if !in_ticket_channel(ctx, command).await? {
        command
            .create_response(
                &ctx.http,
                ephemeral("❌ This command can only be used in ticket channels."),
            )
            .await?;
        return Ok(());
    }

    command
        .channel_id
        .create_permission(&ctx.http, member_access(user_id.get()))
        .await?;

    command
        .create_response(
            &ctx.http,
            public(format!("✅ <@{}> was added to the ticket.", user_id)),
        )
        .await?;

    Ok(())
}

pub async fn remove_member(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let Some(user_id) = option(command, "member").and_then(|value| value.as_user_id()) else {
        command
            .create_response(&ctx.http, ephemeral("❌ Please choose a member."))
            .await?;
        return Ok(());
    };

    if !in_ticket_channel(ctx, command).await? {
        command
            .create_response(
                &ctx.http,
                ephemeral("❌ This command can only be used in ticket channels."),
            )
            .await?;
        return Ok(());
    }

    command
        .channel_id
        .create_permission(&ctx.http, member_denied(user_id.get()))
        .await?;

    command
        .create_response(
            &ctx.http,
            public(format!("<@{}> was removed from the ticket.", user_id)),
        )
        .await?;

    Ok(())
}

/// Confirms the invoker holds the administrator team role.
pub async fn admin_only(
    config: &Config,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let is_admin = match (config.ticket.team.administrator, command.member.as_ref()) {
        (Some(role_id), Some(member)) => member.roles.contains(&RoleId::new(role_id)),
        _ => false,
    };

    let reply = if is_admin {
        "✅ Success: this command can only be used by administrators!"
    } else {
        "🛑 Access denied! You must be an administrator to use this command."
    };

    command.create_response(&ctx.http, ephemeral(reply)).await?;

    Ok(())
}
