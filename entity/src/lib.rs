//! SeaORM entities for the bot's SQLite database.

pub mod prelude;

pub mod clan;
pub mod clan_member;
pub mod faq_entry;
pub mod modmail_case;
pub mod temp_voice_hub;
pub mod temp_voice_session;
pub mod ticket;
