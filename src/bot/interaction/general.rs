use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{
    Colour, CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, Permissions,
};

use crate::{
    bot::{
        command::{self, PanelKind},
        interaction::{clan, ephemeral, faq, has_permission, option, rules, ticket, NO_PERMISSION},
        start::ShardManagerContainer,
    },
    error::AppError,
    service::rules::AcceptPanel,
};

/// Formats the shard latency, `?` until the first heartbeat was acknowledged.
pub fn format_latency(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("{}ms", latency.as_millis()),
        None => "?".to_string(),
    }
}

pub async fn ping(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>().cloned()
    };

    let latency = match manager {
        Some(manager) => manager
            .runners
            .lock()
            .await
            .get(&ctx.shard_id)
            .and_then(|runner| runner.latency),
        None => None,
    };

    let embed = CreateEmbed::new()
        .title("🏓 Pong!")
        .description(format!("Latency: **{}**", format_latency(latency)))
        .colour(Colour::BLURPLE);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            ),
        )
        .await?;

    Ok(())
}

pub async fn sync(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    if !has_permission(permissions, Permissions::ADMINISTRATOR) {
        command
            .create_response(&ctx.http, ephemeral(NO_PERMISSION))
            .await?;
        return Ok(());
    }

    let reply = match command::register(&ctx.http).await {
        Ok(commands) => {
            tracing::info!("Re-registered {} global commands", commands.len());
            format!("✅ Synced {} commands.", commands.len())
        }
        Err(e) => {
            tracing::error!("Failed to sync commands: {:?}", e);
            format!("❌ Sync failed: {}", e)
        }
    };

    command.create_response(&ctx.http, ephemeral(reply)).await?;

    Ok(())
}

/// Posts one of the panels into the command's channel.
pub async fn panel(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(kind) = option(command, "kind")
        .and_then(|value| value.as_str())
        .and_then(PanelKind::from_value)
    else {
        command
            .create_response(&ctx.http, ephemeral("❌ Unknown panel."))
            .await?;
        return Ok(());
    };

    let message = match kind {
        PanelKind::Ticket => ticket::panel_message(),
        PanelKind::Faq => faq::panel_message(db).await?,
        PanelKind::Clan => clan::main_panel(),
        PanelKind::Rules => rules::accept_panel_message(AcceptPanel::ServerRules),
        PanelKind::ClanRules => rules::accept_panel_message(AcceptPanel::ClanRules),
    };

    command.channel_id.send_message(&ctx.http, message).await?;

    tracing::info!(
        "{} panel posted in channel {} by {}",
        kind.value(),
        command.channel_id,
        command.user.id
    );

    command
        .create_response(&ctx.http, ephemeral("✅ Panel sent."))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_latency() {
        assert_eq!(format_latency(Some(Duration::from_millis(42))), "42ms");
        assert_eq!(format_latency(None), "?");
    }
}
