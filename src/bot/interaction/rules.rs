use serenity::all::{
    ButtonStyle, CommandInteraction, ComponentInteraction, Context, CreateActionRow,
    CreateButton, CreateMessage, GuildId, RoleId, UserId,
};

use crate::{
    bot::{
        custom_id,
        interaction::{ephemeral, option, NO_PERMISSION},
    },
    config::Config,
    error::AppError,
    service::rules::{rules_embed, AcceptPanel, RulesLanguage},
};

fn accept_custom_id(panel: AcceptPanel) -> &'static str {
    match panel {
        AcceptPanel::ServerRules => custom_id::RULES_ACCEPT,
        AcceptPanel::ClanRules => custom_id::CLAN_RULES_ACCEPT,
    }
}

pub fn accept_panel_message(panel: AcceptPanel) -> CreateMessage {
    let button = CreateButton::new(accept_custom_id(panel))
        .label("Accept")
        .style(ButtonStyle::Success)
        .emoji('✅');

    CreateMessage::new()
        .embed(panel.embed())
        .components(vec![CreateActionRow::Buttons(vec![button])])
}

/// Grants the role behind an accept button.
///
/// Members who already hold the role are told so instead.
pub async fn accept(
    config: &Config,
    ctx: &Context,
    component: &ComponentInteraction,
    base: &str,
) -> Result<(), AppError> {
    let panel = if base == custom_id::CLAN_RULES_ACCEPT {
        AcceptPanel::ClanRules
    } else {
        AcceptPanel::ServerRules
    };
    let role_id = match panel {
        AcceptPanel::ServerRules => config.rules_role_id,
        AcceptPanel::ClanRules => config.clan.rules_role_id,
    };

    let (Some(guild_id), Some(role_id)) = (component.guild_id, role_id) else {
        tracing::warn!("Accept button pressed but its role is not configured");
        component
            .create_response(
                &ctx.http,
                ephemeral("❌ This panel is not set up yet. Please contact the team."),
            )
            .await?;
        return Ok(());
    };

    let role_id = RoleId::new(role_id);
    let already_accepted = component
        .member
        .as_ref()
        .is_some_and(|member| member.roles.contains(&role_id));

    if already_accepted {
        component
            .create_response(&ctx.http, ephemeral(panel.already_accepted()))
            .await?;
        return Ok(());
    }

    grant_role(ctx, guild_id, component.user.id, role_id, "Rules accepted").await?;

    component
        .create_response(
            &ctx.http,
            ephemeral(panel.accepted(guild_id.get(), config.clan.channel_id)),
        )
        .await?;

    Ok(())
}

pub async fn grant_role(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    role_id: RoleId,
    reason: &str,
) -> Result<(), AppError> {
    ctx.http
        .add_member_role(guild_id, user_id, role_id, Some(reason))
        .await?;

    Ok(())
}

/// Owner-only: posts the rules embed for a language into the channel.
pub async fn post_rules(
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

    let language = option(command, "language")
        .and_then(|value| value.as_str())
        .and_then(RulesLanguage::from_code)
        .unwrap_or(RulesLanguage::English);

    command
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(rules_embed(language)))
        .await?;

    command
        .create_response(&ctx.http, ephemeral("✅ Rules sent."))
        .await?;

    Ok(())
}
