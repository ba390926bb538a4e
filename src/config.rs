use std::collections::HashSet;

use crate::{
    error::{config::ConfigError, AppError},
    model::{
        role_category::{RoleCategoryConfig, UpperBound},
        ticket::TeamRoles,
    },
    util::parse::{parse_id, parse_id_list},
};

const DEFAULT_DATABASE_URL: &str = "sqlite://tradia.db?mode=rwc";
const DEFAULT_HTTP_BIND_ADDR: &str = "0.0.0.0:8899";
const DEFAULT_COMMAND_PREFIX: &str = "t!";

/// Channel categories tickets move between over their lifecycle.
#[derive(Debug, Clone, Default)]
pub struct TicketConfig {
    pub open_category_id: Option<u64>,
    pub claimed_category_id: Option<u64>,
    pub closed_category_id: Option<u64>,
    pub team: TeamRoles,
}

#[derive(Debug, Clone, Default)]
pub struct ModmailConfig {
    pub category_id: Option<u64>,
    pub closed_category_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ClanConfig {
    /// Channel receiving new clan requests for review.
    pub admin_channel_id: Option<u64>,
    /// Role granted when a member accepts the clan rules.
    pub rules_role_id: Option<u64>,
    /// Public clan channel.
    pub channel_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct GreetingConfig {
    pub welcome_channel_id: Option<u64>,
    pub boost_channel_id: Option<u64>,
    pub team_channel_id: Option<u64>,
    pub team_ping_role_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct SupportForumConfig {
    pub forum_channel_id: Option<u64>,
    pub webhook_url: Option<String>,
}

impl SupportForumConfig {
    /// The bridge runs only when both the forum and the webhook are configured.
    pub fn is_enabled(&self) -> bool {
        self.forum_channel_id.is_some() && self.webhook_url.is_some()
    }
}

/// Application configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub http_bind_addr: String,
    pub command_prefix: String,

    /// Main guild, also used as the support guild for modmail.
    pub guild_id: Option<u64>,
    /// Users allowed to run owner-only commands.
    pub owner_user_ids: Vec<u64>,
    pub rules_role_id: Option<u64>,

    pub role_category: RoleCategoryConfig,
    pub ticket: TicketConfig,
    pub modmail: ModmailConfig,
    pub clan: ClanConfig,
    pub greeting: GreetingConfig,
    pub support_forum: SupportForumConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and every set variable parsed
    /// - `Err(ConfigError::MissingEnvVar)` - `DISCORD_TOKEN` is not set
    /// - `Err(ConfigError::InvalidEnvVar)` - A set variable has an unparsable value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let upper_bound = match env.optional_id("ROLE_CATEGORY_UPPER_BOUND")? {
            None => UpperBound::Unbounded,
            Some(bound) => UpperBound::Fixed(u16::try_from(bound).map_err(|_| {
                ConfigError::InvalidEnvVar {
                    name: "ROLE_CATEGORY_UPPER_BOUND".to_string(),
                    value: bound.to_string(),
                }
            })?),
        };

        Ok(Self {
            discord_token: env.required("DISCORD_TOKEN")?,
            database_url: env.or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
            http_bind_addr: env.or_default("HTTP_BIND_ADDR", DEFAULT_HTTP_BIND_ADDR),
            command_prefix: env.or_default("COMMAND_PREFIX", DEFAULT_COMMAND_PREFIX),
            guild_id: env.optional_id("GUILD_ID")?,
            owner_user_ids: env.id_list("OWNER_USER_IDS")?,
            rules_role_id: env.optional_id("RULES_ROLE_ID")?,
            role_category: RoleCategoryConfig {
                category_role_ids: env.id_list("CATEGORY_ROLE_IDS")?,
                excluded_role_ids: env
                    .id_list("EXCLUDED_ROLE_IDS")?
                    .into_iter()
                    .collect::<HashSet<u64>>(),
                upper_bound,
            },
            ticket: TicketConfig {
                open_category_id: env.optional_id("TICKET_OPEN_CATEGORY_ID")?,
                claimed_category_id: env.optional_id("TICKET_CLAIMED_CATEGORY_ID")?,
                closed_category_id: env.optional_id("TICKET_CLOSED_CATEGORY_ID")?,
                team: TeamRoles {
                    supporter: env.optional_id("SUPPORTER_ROLE_ID")?,
                    moderator: env.optional_id("MODERATOR_ROLE_ID")?,
                    administrator: env.optional_id("ADMINISTRATOR_ROLE_ID")?,
                    all_tickets: env.optional_id("ALL_TICKETS_ROLE_ID")?,
                },
            },
            modmail: ModmailConfig {
                category_id: env.optional_id("MODMAIL_CATEGORY_ID")?,
                closed_category_id: env.optional_id("MODMAIL_CLOSED_CATEGORY_ID")?,
            },
            clan: ClanConfig {
                admin_channel_id: env.optional_id("CLAN_ADMIN_CHANNEL_ID")?,
                rules_role_id: env.optional_id("CLAN_RULES_ROLE_ID")?,
                channel_id: env.optional_id("CLAN_CHANNEL_ID")?,
            },
            greeting: GreetingConfig {
                welcome_channel_id: env.optional_id("WELCOME_CHANNEL_ID")?,
                boost_channel_id: env.optional_id("BOOST_CHANNEL_ID")?,
                team_channel_id: env.optional_id("TEAM_CHANNEL_ID")?,
                team_ping_role_id: env.optional_id("TEAM_PING_ROLE_ID")?,
            },
            support_forum: SupportForumConfig {
                forum_channel_id: env.optional_id("SUPPORT_FORUM_CHANNEL_ID")?,
                webhook_url: env.optional("SUPPORT_WEBHOOK_URL"),
            },
        })
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_user_ids.contains(&user_id)
    }

    /// Logs a warning for every feature left without its configuration.
    pub fn warn_disabled_features(&self) {
        let checks: [(&str, bool); 9] = [
            ("Role categories (CATEGORY_ROLE_IDS)", self.role_category.is_enabled()),
            ("Tickets (TICKET_OPEN_CATEGORY_ID)", self.ticket.open_category_id.is_some()),
            ("Modmail (GUILD_ID, MODMAIL_CATEGORY_ID)", self.guild_id.is_some() && self.modmail.category_id.is_some()),
            ("Clan requests (CLAN_ADMIN_CHANNEL_ID)", self.clan.admin_channel_id.is_some()),
            ("Rules accept (RULES_ROLE_ID)", self.rules_role_id.is_some()),
            ("Welcome messages (WELCOME_CHANNEL_ID)", self.greeting.welcome_channel_id.is_some()),
            ("Boost messages (BOOST_CHANNEL_ID)", self.greeting.boost_channel_id.is_some()),
            ("Anti-alt alerts (TEAM_CHANNEL_ID)", self.greeting.team_channel_id.is_some()),
            ("Support forum bridge (SUPPORT_FORUM_CHANNEL_ID, SUPPORT_WEBHOOK_URL)", self.support_forum.is_enabled()),
        ];

        for (feature, enabled) in checks {
            if !enabled {
                tracing::warn!("{} is not configured and will be disabled", feature);
            }
        }

        if self.owner_user_ids.is_empty() {
            tracing::warn!("OWNER_USER_IDS is empty, owner-only commands cannot be used");
        }
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn optional_id(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        self.optional(name)
            .map(|value| {
                parse_id(&value).ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                })
            })
            .transpose()
    }

    fn id_list(&self, name: &str) -> Result<Vec<u64>, ConfigError> {
        match self.optional(name) {
            None => Ok(Vec::new()),
            Some(value) => parse_id_list(&value).map_err(|entry| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: entry,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn requires_discord_token() {
        let result = Config::from_lookup(lookup(&[]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string())
        );
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "token")])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.http_bind_addr, DEFAULT_HTTP_BIND_ADDR);
        assert_eq!(config.command_prefix, "t!");
        assert_eq!(config.role_category.upper_bound, UpperBound::Unbounded);
        assert!(config.guild_id.is_none());
        assert!(!config.support_forum.is_enabled());
    }

    #[test]
    fn parses_role_category_settings() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("CATEGORY_ROLE_IDS", "10, 20,30"),
            ("EXCLUDED_ROLE_IDS", "99"),
            ("ROLE_CATEGORY_UPPER_BOUND", "999"),
        ]))
        .unwrap();

        assert_eq!(config.role_category.category_role_ids, vec![10, 20, 30]);
        assert!(config.role_category.excluded_role_ids.contains(&99));
        assert_eq!(config.role_category.upper_bound, UpperBound::Fixed(999));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("GUILD_ID", "main-guild"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar {
                name: "GUILD_ID".to_string(),
                value: "main-guild".to_string(),
            }
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("WELCOME_CHANNEL_ID", "  "),
        ]))
        .unwrap();

        assert!(config.greeting.welcome_channel_id.is_none());
    }

    #[test]
    fn rejects_zero_ids() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("WELCOME_CHANNEL_ID", "0"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar {
                name: "WELCOME_CHANNEL_ID".to_string(),
                value: "0".to_string(),
            }
        );

        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("OWNER_USER_IDS", "12, 0"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar {
                name: "OWNER_USER_IDS".to_string(),
                value: "0".to_string(),
            }
        );
    }
}
