pub use super::clan::Entity as Clan;
pub use super::clan_member::Entity as ClanMember;
pub use super::faq_entry::Entity as FaqEntry;
pub use super::modmail_case::Entity as ModmailCase;
pub use super::temp_voice_hub::Entity as TempVoiceHub;
pub use super::temp_voice_session::Entity as TempVoiceSession;
pub use super::ticket::Entity as Ticket;
