//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories insert
//! the entity into the database and return the stored model.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::create_ticket(&db).await?;
//! let clan = factory::clan::ClanFactory::new(&db)
//!     .tag("ABC")
//!     .accepted(true)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `ticket` - Support tickets
//! - `temp_voice` - Temporary voice hubs and sessions
//! - `clan` - Clans
//! - `clan_member` - Clan memberships
//! - `modmail_case` - Open modmail cases
//! - `faq_entry` - FAQ entries
//! - `helpers` - Shared ID generation

pub mod clan;
pub mod clan_member;
pub mod faq_entry;
pub mod helpers;
pub mod modmail_case;
pub mod temp_voice;
pub mod ticket;

pub use clan::create_clan;
pub use clan_member::create_clan_member;
pub use faq_entry::create_faq_entry;
pub use modmail_case::create_modmail_case;
pub use temp_voice::{create_hub, create_session};
pub use ticket::create_ticket;
