//! Slash command definitions and registration.

use serenity::all::{
    ChannelType, Command, CommandOptionType, CreateCommand, CreateCommandOption, Http,
    Permissions,
};

use crate::service::rules::RulesLanguage;

pub const PING: &str = "ping";
pub const SYNC: &str = "sync";
pub const TEMPVOICE: &str = "tempvoice";
pub const TICKET_ADD_MEMBER: &str = "ticket-add-member";
pub const TICKET_REMOVE_MEMBER: &str = "ticket-remove-member";
pub const TICKET_ADMIN_ONLY: &str = "ticket-admin-only";
pub const ADD_FAQ: &str = "add-faq";
pub const DELETE_FAQ: &str = "delete-faq";
pub const PANEL: &str = "panel";
pub const RULES: &str = "rules";

/// Panels that can be posted with `/panel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Ticket,
    Faq,
    Clan,
    Rules,
    ClanRules,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Ticket,
        PanelKind::Faq,
        PanelKind::Clan,
        PanelKind::Rules,
        PanelKind::ClanRules,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Faq => "faq",
            Self::Clan => "clan",
            Self::Rules => "rules",
            Self::ClanRules => "clan-rules",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Ticket => "Ticket panel",
            Self::Faq => "FAQ panel",
            Self::Clan => "Clan panel",
            Self::Rules => "Rules accept panel",
            Self::ClanRules => "Clan rules accept panel",
        }
    }
}

/// Every global slash command the bot provides.
pub fn commands() -> Vec<CreateCommand> {
    let panel_option = PanelKind::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "kind", "Panel to post")
            .required(true),
        |option, kind| option.add_string_choice(kind.label(), kind.value()),
    );

    let language_option = RulesLanguage::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "language", "Language of the rules")
            .required(true),
        |option, language| option.add_string_choice(language.label(), language.code()),
    );

    vec![
        CreateCommand::new(PING).description("Shows the bot latency"),
        CreateCommand::new(SYNC)
            .description("Re-registers all slash commands")
            .default_member_permissions(Permissions::ADMINISTRATOR),
        CreateCommand::new(TEMPVOICE)
            .description("Sets the hub channel for temporary voice channels")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Voice channel members join to get their own channel",
                )
                .channel_types(vec![ChannelType::Voice])
                .required(true),
            ),
        CreateCommand::new(TICKET_ADD_MEMBER)
            .description("Adds a member to this ticket")
            .default_member_permissions(Permissions::MANAGE_MESSAGES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to add")
                    .required(true),
            ),
        CreateCommand::new(TICKET_REMOVE_MEMBER)
            .description("Removes a member from this ticket")
            .default_member_permissions(Permissions::MANAGE_MESSAGES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to remove")
                    .required(true),
            ),
        CreateCommand::new(TICKET_ADMIN_ONLY)
            .description("Checks that you hold the administrator role"),
        CreateCommand::new(ADD_FAQ)
            .description("Adds a new FAQ entry")
            .default_member_permissions(Permissions::ADMINISTRATOR),
        CreateCommand::new(DELETE_FAQ)
            .description("Deletes an FAQ entry")
            .default_member_permissions(Permissions::ADMINISTRATOR),
        CreateCommand::new(PANEL)
            .description("Posts a panel in this channel")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(panel_option),
        CreateCommand::new(RULES)
            .description("Posts the server rules in this channel")
            .add_option(language_option),
    ]
}

/// Overwrites the global command set.
///
/// # Returns
/// - `Ok(Vec<Command>)` - The registered commands
/// - `Err(serenity::Error)` - Discord rejected the registration
pub async fn register(http: &Http) -> Result<Vec<Command>, serenity::Error> {
    Command::set_global_commands(http, commands()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn command_names_are_unique() {
        let names: Vec<String> = commands()
            .iter()
            .map(|command| serde_json::to_value(command).unwrap()["name"].to_string())
            .collect();
        let unique: HashSet<&String> = names.iter().collect();

        assert_eq!(names.len(), 10);
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn panel_kinds_round_trip() {
        for kind in PanelKind::ALL {
            assert_eq!(PanelKind::from_value(kind.value()), Some(kind));
        }
        assert_eq!(PanelKind::from_value("unknown"), None);
    }
}
