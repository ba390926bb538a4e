//! Text commands starting with the configured prefix (`t!` by default).

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, Message, Permissions};

use crate::{
    bot::{
        interaction::{clan, faq, rules, ticket},
        modmail,
    },
    config::Config,
    error::AppError,
    service::{
        clan::ClanService,
        rules::{rules_embed, AcceptPanel, RulesLanguage},
    },
};

const NO_PERMISSION: &str = "⚠️ You do not have permission to use this command.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    OpenModmail,
    CloseModmail,
    DeleteModmail,
    TicketPanel,
    FaqPanel,
    ClanSetup,
    ClanEdit,
    RulesAcceptPanel,
    ClanRulesAcceptPanel,
    Rules(RulesLanguage),
}

impl PrefixCommand {
    /// Parses a message into a command; the name is matched case-insensitively.
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let rest = content.trim().strip_prefix(prefix)?;
        let mut words = rest.split_whitespace().map(str::to_lowercase);
        let name = words.next()?;

        Some(match name.as_str() {
            "m" => Self::OpenModmail,
            "c" => Self::CloseModmail,
            "del" => Self::DeleteModmail,
            "ticket-panel" => Self::TicketPanel,
            "faq-panel" => Self::FaqPanel,
            "clan" => match words.next()?.as_str() {
                "setup" => Self::ClanSetup,
                "edit" => Self::ClanEdit,
                _ => return None,
            },
            "rulesacceptmsg" => Self::RulesAcceptPanel,
            "clanrulesacceptmsg" => Self::ClanRulesAcceptPanel,
            "rules-de" => Self::Rules(RulesLanguage::German),
            "rules-en" => Self::Rules(RulesLanguage::English),
            _ => return None,
        })
    }
}

/// Runs the prefix command in `msg`, if any.
///
/// # Returns
/// - `true` - The message was a command and has been handled
/// - `false` - Not a command, the message should be processed further
pub async fn dispatch(db: &DatabaseConnection, config: &Config, ctx: &Context, msg: &Message) -> bool {
    let Some(command) = PrefixCommand::parse(&msg.content, &config.command_prefix) else {
        return false;
    };

    if let Err(e) = run(db, config, ctx, msg, command).await {
        let reply = match &e {
            AppError::ClanErr(e) => e.to_string(),
            AppError::BadRequest(text) | AppError::NotFound(text) => text.clone(),
            e => {
                tracing::error!("Failed to run prefix command {:?}: {}", command, e);
                "❌ Something went wrong while running this command.".to_string()
            }
        };

        if let Err(e) = msg.reply(&ctx.http, reply).await {
            tracing::debug!("Failed to report prefix command error: {:?}", e);
        }
    }

    true
}

async fn run(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    msg: &Message,
    command: PrefixCommand,
) -> Result<(), AppError> {
    match command {
        PrefixCommand::OpenModmail => modmail::open(db, config, ctx, msg).await,
        PrefixCommand::CloseModmail => modmail::close(db, config, ctx, msg).await,
        PrefixCommand::DeleteModmail => {
            if !author_has(ctx, msg, Permissions::MANAGE_CHANNELS).await {
                return deny(ctx, msg).await;
            }
            modmail::delete(db, config, ctx, msg).await
        }
        PrefixCommand::TicketPanel => {
            if !author_has(ctx, msg, Permissions::ADMINISTRATOR).await {
                return deny(ctx, msg).await;
            }
            post(ctx, msg, ticket::panel_message()).await
        }
        PrefixCommand::FaqPanel => {
            if !author_has(ctx, msg, Permissions::ADMINISTRATOR).await {
                return deny(ctx, msg).await;
            }
            post(ctx, msg, faq::panel_message(db).await?).await
        }
        PrefixCommand::ClanSetup => {
            if !author_has(ctx, msg, Permissions::ADMINISTRATOR).await {
                return deny(ctx, msg).await;
            }
            post(ctx, msg, clan::main_panel()).await
        }
        PrefixCommand::ClanEdit => {
            let clan = ClanService::new(db)
                .editable_clan(msg.author.id.get(), Utc::now())
                .await?;
            post(ctx, msg, clan::edit_panel(&clan)).await
        }
        PrefixCommand::RulesAcceptPanel | PrefixCommand::ClanRulesAcceptPanel => {
            if !config.is_owner(msg.author.id.get()) {
                return deny(ctx, msg).await;
            }
            let panel = match command {
                PrefixCommand::ClanRulesAcceptPanel => AcceptPanel::ClanRules,
                _ => AcceptPanel::ServerRules,
            };
            post(ctx, msg, rules::accept_panel_message(panel)).await
        }
        PrefixCommand::Rules(language) => {
            if !config.is_owner(msg.author.id.get()) {
                return deny(ctx, msg).await;
            }
            post(ctx, msg, CreateMessage::new().embed(rules_embed(language))).await
        }
    }
}

async fn post(ctx: &Context, msg: &Message, message: CreateMessage) -> Result<(), AppError> {
    msg.channel_id.send_message(&ctx.http, message).await?;

    Ok(())
}

async fn deny(ctx: &Context, msg: &Message) -> Result<(), AppError> {
    msg.reply(&ctx.http, NO_PERMISSION).await?;

    Ok(())
}

/// Whether the author holds `required` in the channel of `msg`; administrators always do.
///
/// Always false outside guilds.
pub async fn author_has(ctx: &Context, msg: &Message, required: Permissions) -> bool {
    let Some(guild_id) = msg.guild_id else {
        return false;
    };
    let member = match guild_id.member(&ctx.http, msg.author.id).await {
        Ok(member) => member,
        Err(e) => {
            tracing::warn!("Failed to fetch member {}: {:?}", msg.author.id, e);
            return false;
        }
    };

    let Some(guild) = ctx.cache.guild(guild_id) else {
        return false;
    };
    let permissions = match guild.channels.get(&msg.channel_id) {
        Some(channel) => guild.user_permissions_in(channel, &member),
        None => guild.member_permissions(&member),
    };

    permissions.administrator() || permissions.contains(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(PrefixCommand::parse("t!m", "t!"), Some(PrefixCommand::OpenModmail));
        assert_eq!(
            PrefixCommand::parse("  t!ticket-panel ", "t!"),
            Some(PrefixCommand::TicketPanel)
        );
        assert_eq!(
            PrefixCommand::parse("t!clan edit", "t!"),
            Some(PrefixCommand::ClanEdit)
        );
        assert_eq!(
            PrefixCommand::parse("t!RULES-DE", "t!"),
            Some(PrefixCommand::Rules(RulesLanguage::German))
        );
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(PrefixCommand::parse("hello", "t!"), None);
        assert_eq!(PrefixCommand::parse("t!", "t!"), None);
        assert_eq!(PrefixCommand::parse("t!clan", "t!"), None);
        assert_eq!(PrefixCommand::parse("t!clan join", "t!"), None);
        assert_eq!(PrefixCommand::parse("!m", "t!"), None);
    }

    #[test]
    fn respects_custom_prefix() {
        assert_eq!(PrefixCommand::parse("?c", "?"), Some(PrefixCommand::CloseModmail));
        assert_eq!(PrefixCommand::parse("t!c", "?"), None);
    }
}
