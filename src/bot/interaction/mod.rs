//! Slash command, component and modal routing.
//!
//! Handlers return `Result<(), AppError>`; the router logs failures and answers the
//! invoking user with an ephemeral message so no interaction is left unanswered.

pub mod clan;
pub mod faq;
pub mod general;
pub mod rules;
pub mod temp_voice;
pub mod ticket;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ActionRowComponent, CommandDataOptionValue, CommandInteraction, ComponentInteraction,
    ComponentInteractionDataKind, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
    ModalInteraction, Permissions,
};

use crate::{
    bot::{command, custom_id},
    config::Config,
    error::{role_sync::is_permission_error, AppError},
};

const GENERIC_ERROR: &str = "❌ Something went wrong. Please try again later.";
const MISSING_BOT_PERMISSION: &str =
    "⚠️ I do not have permission to do that. Please check my roles.";
pub const NO_PERMISSION: &str = "⚠️ You do not have permission to do that.";

pub async fn handle_interaction(
    db: &DatabaseConnection,
    config: &Config,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) => {
            if let Err(err) = route_command(db, config, &ctx, &command).await {
                let message = log_and_describe(&err, &command.data.name);
                if command
                    .create_response(&ctx.http, ephemeral(message.clone()))
                    .await
                    .is_err()
                {
                    let followup = CreateInteractionResponseFollowup::new()
                        .content(message)
                        .ephemeral(true);
                    if let Err(e) = command.create_followup(&ctx.http, followup).await {
                        tracing::debug!("Failed to report command error: {:?}", e);
                    }
                }
            }
        }
        Interaction::Component(component) => {
            if let Err(err) = route_component(db, config, &ctx, &component).await {
                let message = log_and_describe(&err, &component.data.custom_id);
                if component
                    .create_response(&ctx.http, ephemeral(message.clone()))
                    .await
                    .is_err()
                {
                    let followup = CreateInteractionResponseFollowup::new()
                        .content(message)
                        .ephemeral(true);
                    if let Err(e) = component.create_followup(&ctx.http, followup).await {
                        tracing::debug!("Failed to report component error: {:?}", e);
                    }
                }
            }
        }
        Interaction::Modal(modal) => {
            if let Err(err) = route_modal(db, config, &ctx, &modal).await {
                let message = log_and_describe(&err, &modal.data.custom_id);
                if modal
                    .create_response(&ctx.http, ephemeral(message.clone()))
                    .await
                    .is_err()
                {
                    let followup = CreateInteractionResponseFollowup::new()
                        .content(message)
                        .ephemeral(true);
                    if let Err(e) = modal.create_followup(&ctx.http, followup).await {
                        tracing::debug!("Failed to report modal error: {:?}", e);
                    }
                }
            }
        }
        _ => {}
    }
}

async fn route_command(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        command::PING => general::ping(ctx, command).await,
        command::SYNC => general::sync(ctx, command).await,
        command::PANEL => general::panel(db, ctx, command).await,
        command::TEMPVOICE => temp_voice::set_hub(db, config, ctx, command).await,
        command::TICKET_ADD_MEMBER => ticket::add_member(ctx, command).await,
        command::TICKET_REMOVE_MEMBER => ticket::remove_member(ctx, command).await,
        command::TICKET_ADMIN_ONLY => ticket::admin_only(config, ctx, command).await,
        command::ADD_FAQ => faq::open_add_modal(ctx, command).await,
        command::DELETE_FAQ => faq::show_delete_select(db, ctx, command).await,
        command::RULES => rules::post_rules(config, ctx, command).await,
        name => {
            tracing::warn!("Received unknown command /{}", name);
            Ok(())
        }
    }
}

async fn route_component(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (base, arg) = custom_id::split(&component.data.custom_id);

    match base {
        custom_id::TICKET_SELECT => ticket::open(db, config, ctx, component).await,
        custom_id::TICKET_CLAIM => ticket::claim(db, config, ctx, component).await,
        custom_id::TICKET_CLOSE => ticket::close(db, config, ctx, component).await,
        custom_id::TICKET_REOPEN => ticket::reopen(db, config, ctx, component).await,
        custom_id::TICKET_DELETE => ticket::request_delete(ctx, component).await,
        custom_id::TICKET_DELETE_CONFIRM => ticket::confirm_delete(db, ctx, component).await,
        custom_id::TICKET_DELETE_CANCEL => ticket::cancel_delete(ctx, component).await,

        custom_id::TEMPVOICE_LOCK
        | custom_id::TEMPVOICE_UNLOCK
        | custom_id::TEMPVOICE_HIDE
        | custom_id::TEMPVOICE_SHOW => temp_voice::toggle(db, ctx, component, base).await,
        custom_id::TEMPVOICE_RENAME | custom_id::TEMPVOICE_LIMIT => {
            temp_voice::open_modal(db, ctx, component, base).await
        }

        custom_id::CLAN_CREATE => clan::open_request_modal(db, ctx, component).await,
        custom_id::CLAN_JOIN_LIST => clan::browse(db, ctx, component, 0, false).await,
        custom_id::CLAN_BROWSE => {
            let index = arg.and_then(|arg| arg.parse::<u64>().ok()).unwrap_or(0);
            clan::browse(db, ctx, component, index, true).await
        }
        custom_id::CLAN_BROWSE_JOIN => clan::join(db, ctx, component, arg).await,
        custom_id::CLAN_APPROVE => clan::approve(db, ctx, component, arg).await,
        custom_id::CLAN_REJECT => clan::reject(db, ctx, component, arg).await,
        custom_id::CLAN_EDIT => clan::open_edit_modal(db, ctx, component, arg).await,

        custom_id::RULES_ACCEPT | custom_id::CLAN_RULES_ACCEPT => {
            rules::accept(config, ctx, component, base).await
        }

        custom_id::FAQ_SELECT => faq::show_answer(db, ctx, component).await,
        custom_id::FAQ_DELETE_SELECT => faq::delete(db, ctx, component).await,

        other => {
            tracing::warn!("Received unknown component {}", other);
            Ok(())
        }
    }
}

async fn route_modal(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let (base, arg) = custom_id::split(&modal.data.custom_id);

    match base {
        custom_id::TEMPVOICE_RENAME_MODAL => temp_voice::rename(db, ctx, modal).await,
        custom_id::TEMPVOICE_LIMIT_MODAL => temp_voice::limit(db, ctx, modal).await,
        custom_id::CLAN_CREATE_MODAL => clan::submit_request(db, config, ctx, modal).await,
        custom_id::CLAN_EDIT_MODAL => clan::submit_edit(db, ctx, modal, arg).await,
        custom_id::FAQ_ADD_MODAL => faq::submit(db, ctx, modal).await,
        other => {
            tracing::warn!("Received unknown modal {}", other);
            Ok(())
        }
    }
}

/// Logs a handler error and returns the text shown to the user.
///
/// Validation errors are expected and shown as-is; anything else is logged as a
/// failure and replaced with a generic message.
fn log_and_describe(err: &AppError, source: &str) -> String {
    match err {
        AppError::ClanErr(e) => e.to_string(),
        AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
        AppError::DiscordErr(e) if is_permission_error(e) => {
            tracing::warn!("Missing permission while handling {}: {}", source, e);
            MISSING_BOT_PERMISSION.to_string()
        }
        err => {
            tracing::error!("Failed to handle interaction {}: {}", source, err);
            GENERIC_ERROR.to_string()
        }
    }
}

pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Public reply in the interaction's channel.
pub fn public(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

/// Whether the interaction member's resolved permissions include `required`.
///
/// Administrators pass every check.
pub fn has_permission(permissions: Option<Permissions>, required: Permissions) -> bool {
    permissions.is_some_and(|permissions| {
        permissions.administrator() || permissions.contains(required)
    })
}

pub fn member_permissions(component: &ComponentInteraction) -> Option<Permissions> {
    component.member.as_ref().and_then(|member| member.permissions)
}

/// Gets a command option by name.
pub fn option<'a>(
    command: &'a CommandInteraction,
    name: &str,
) -> Option<&'a CommandDataOptionValue> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

/// Gets a text input value from a submitted modal, empty when missing.
pub fn modal_value(modal: &ModalInteraction, input_id: &str) -> String {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == input_id => {
                Some(input.value.clone().unwrap_or_default())
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// First selected value of a string select.
pub fn selected_value(component: &ComponentInteraction) -> Option<&str> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => {
            values.first().map(String::as_str)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::clan::ClanError;

    #[test]
    fn administrators_pass_every_check() {
        assert!(has_permission(
            Some(Permissions::ADMINISTRATOR),
            Permissions::MANAGE_MESSAGES
        ));
        assert!(has_permission(
            Some(Permissions::MANAGE_MESSAGES | Permissions::SEND_MESSAGES),
            Permissions::MANAGE_MESSAGES
        ));
        assert!(!has_permission(
            Some(Permissions::SEND_MESSAGES),
            Permissions::MANAGE_MESSAGES
        ));
        assert!(!has_permission(None, Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn validation_errors_are_shown_to_the_user() {
        assert_eq!(
            log_and_describe(&AppError::ClanErr(ClanError::NotOwner), "clan_edit"),
            ClanError::NotOwner.to_string()
        );
        assert_eq!(
            log_and_describe(&AppError::BadRequest("nope".to_string()), "faq"),
            "nope"
        );
        assert_eq!(
            log_and_describe(&AppError::DbErr(sea_orm::DbErr::Custom("boom".to_string())), "faq"),
            GENERIC_ERROR
        );
    }
}
