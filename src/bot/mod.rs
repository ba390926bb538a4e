//! Discord gateway bot.
//!
//! The bot is initialised during startup and runs in its own tokio task next to the
//! HTTP callback server. Its HTTP client is shared with the server so forum answers
//! can be posted without a second connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and thread events
//! - `GUILD_MEMBERS` - Member joins and role updates (privileged intent)
//! - `GUILD_MESSAGES` / `DIRECT_MESSAGES` - Prefix commands, modmail and forum relay
//! - `MESSAGE_CONTENT` - Reading prefix commands and relayed text (privileged intent)
//! - `GUILD_VOICE_STATES` - Temporary voice channels
//!
//! Both privileged intents must be enabled in the Discord Developer Portal.

pub mod command;
pub mod custom_id;
pub mod directory;
pub mod handler;
pub mod interaction;
pub mod modmail;
pub mod prefix;
pub mod start;
