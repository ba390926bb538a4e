//! Service layer for business logic.
//!
//! Services sit between the bot and controller layers and the data layer. They own
//! validation, lifecycle rules and naming, and build the embeds that are posted, while
//! the callers perform the Discord API calls.

pub mod clan;
pub mod faq;
pub mod greeting;
pub mod modmail;
pub mod role_category;
pub mod rules;
pub mod support_forum;
pub mod temp_voice;
pub mod ticket;
