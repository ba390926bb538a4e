//! Temporary voice channel service.
//!
//! Keeps track of the hub channel per guild and of the sessions spawned from it.

use sea_orm::DatabaseConnection;
use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};

use crate::{
    data::temp_voice::TempVoiceRepository,
    error::AppError,
    model::temp_voice::{TempVoiceHub, TempVoiceSession},
    util::text::truncate_chars,
};

/// Name of the category every temporary channel is created in.
pub const TEMP_VOICE_CATEGORY: &str = "TempVoices";

/// Marker contained in the name of every temporary voice channel.
pub const VOICE_CHANNEL_MARKER: &str = "voice-";

const MAX_CHANNEL_NAME_LENGTH: usize = 100;
const MAX_USER_LIMIT: u32 = 99;

pub struct TempVoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TempVoiceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the hub channel of a guild, replacing any previous one.
    pub async fn set_hub(&self, guild_id: u64, channel_id: u64) -> Result<TempVoiceHub, AppError> {
        Ok(TempVoiceRepository::new(self.db)
            .upsert_hub(guild_id, channel_id)
            .await?)
    }

    /// Whether `channel_id` is the hub of `guild_id`.
    pub async fn is_hub(&self, guild_id: u64, channel_id: u64) -> Result<bool, AppError> {
        let hub = TempVoiceRepository::new(self.db).find_hub(guild_id).await?;

        Ok(hub.is_some_and(|hub| hub.channel_id == channel_id))
    }

    pub async fn open_session(
        &self,
        session: TempVoiceSession,
    ) -> Result<TempVoiceSession, AppError> {
        Ok(TempVoiceRepository::new(self.db)
            .create_session(&session)
            .await?)
    }

    /// Gets the session controlled from an interface channel.
    pub async fn session_for_interface(
        &self,
        interface_channel_id: u64,
    ) -> Result<Option<TempVoiceSession>, AppError> {
        Ok(TempVoiceRepository::new(self.db)
            .find_session_by_interface_channel(interface_channel_id)
            .await?)
    }

    /// Removes the session of an emptied voice channel.
    ///
    /// # Returns
    /// - `Ok(Some(session))` - The removed session, whose interface channel should be deleted
    /// - `Ok(None)` - The channel had no stored session
    pub async fn end_session(
        &self,
        voice_channel_id: u64,
    ) -> Result<Option<TempVoiceSession>, AppError> {
        let repo = TempVoiceRepository::new(self.db);
        let Some(session) = repo.find_session_by_voice_channel(voice_channel_id).await? else {
            return Ok(None);
        };

        repo.delete_session(voice_channel_id).await?;

        Ok(Some(session))
    }
}

pub fn voice_channel_name(username: &str) -> String {
    truncate_chars(
        &format!("{}{}", VOICE_CHANNEL_MARKER, username),
        MAX_CHANNEL_NAME_LENGTH,
    )
}

pub fn interface_channel_name(username: &str) -> String {
    truncate_chars(&format!("interface-{}", username), MAX_CHANNEL_NAME_LENGTH)
}

/// Whether a channel name marks a temporary voice channel.
pub fn is_temp_voice_channel(name: &str) -> bool {
    name.to_lowercase().contains(VOICE_CHANNEL_MARKER)
}

/// Validates a new channel name entered in the rename modal.
pub fn parse_channel_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        return Err("The channel name must not be empty.".to_string());
    }
    if name.chars().count() > MAX_CHANNEL_NAME_LENGTH {
        return Err(format!(
            "The channel name can be at most {} characters long.",
            MAX_CHANNEL_NAME_LENGTH
        ));
    }

    Ok(name.to_string())
}

/// Parses the user limit entered in the limit modal; `0` means unlimited.
pub fn parse_user_limit(input: &str) -> Result<u32, String> {
    let limit = input
        .trim()
        .parse::<u32>()
        .map_err(|_| "Unknown number. Please enter a valid number.".to_string())?;

    if limit > MAX_USER_LIMIT {
        return Err(format!("The limit must be between 0 and {}.", MAX_USER_LIMIT));
    }

    Ok(limit)
}

/// Overwrites of an interface channel: hidden from `@everyone`, open to the owner and the bot.
pub fn interface_overwrites(guild_id: u64, owner_id: u64, bot_id: u64) -> Vec<PermissionOverwrite> {
    let member = |user_id: u64| PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(UserId::new(user_id)),
    };

    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
        },
        member(owner_id),
        member(bot_id),
    ]
}

/// Lock and visibility of a temporary channel for `@everyone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceState {
    pub locked: bool,
    pub hidden: bool,
}

/// Reads the interface state from the channel's `@everyone` overwrite.
pub fn interface_state(overwrites: &[PermissionOverwrite], guild_id: u64) -> InterfaceState {
    everyone_overwrite(overwrites, guild_id)
        .map(|overwrite| InterfaceState {
            locked: overwrite.deny.contains(Permissions::CONNECT),
            hidden: overwrite.deny.contains(Permissions::VIEW_CHANNEL),
        })
        .unwrap_or_default()
}

fn everyone_overwrite(overwrites: &[PermissionOverwrite], guild_id: u64) -> Option<&PermissionOverwrite> {
    overwrites.iter().find(|overwrite| {
        matches!(overwrite.kind, PermissionOverwriteType::Role(id) if id.get() == guild_id)
    })
}

/// Lock/unlock and hide/show buttons of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceToggle {
    Lock,
    Unlock,
    Hide,
    Show,
}

impl VoiceToggle {
    fn permission(&self) -> Permissions {
        match self {
            Self::Lock | Self::Unlock => Permissions::CONNECT,
            Self::Hide | Self::Show => Permissions::VIEW_CHANNEL,
        }
    }

    fn denies(&self) -> bool {
        matches!(self, Self::Lock | Self::Hide)
    }

    pub fn apply(&self, state: InterfaceState) -> InterfaceState {
        match self {
            Self::Lock => InterfaceState { locked: true, ..state },
            Self::Unlock => InterfaceState { locked: false, ..state },
            Self::Hide => InterfaceState { hidden: true, ..state },
            Self::Show => InterfaceState { hidden: false, ..state },
        }
    }

    /// New `@everyone` overwrite, keeping every permission the toggle does not own.
    pub fn everyone_overwrite(
        &self,
        current: &[PermissionOverwrite],
        guild_id: u64,
    ) -> PermissionOverwrite {
        let (mut allow, mut deny) = everyone_overwrite(current, guild_id)
            .map(|overwrite| (overwrite.allow, overwrite.deny))
            .unwrap_or((Permissions::empty(), Permissions::empty()));

        let permission = self.permission();
        if self.denies() {
            allow.remove(permission);
            deny.insert(permission);
        } else {
            deny.remove(permission);
            allow.insert(permission);
        }

        PermissionOverwrite {
            allow,
            deny,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
        }
    }

    pub fn confirmation(&self) -> &'static str {
        match self {
            Self::Lock => "🚫 Your channel is now locked.",
            Self::Unlock => "🔓 Your channel is now open.",
            Self::Hide => "🌙 Your channel is now hidden.",
            Self::Show => "🔍 Your channel is now visible.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    #[test]
    fn builds_channel_names() {
        assert_eq!(voice_channel_name("tom"), "voice-tom");
        assert_eq!(interface_channel_name("tom"), "interface-tom");
        assert!(is_temp_voice_channel("Voice-Tom"));
        assert!(!is_temp_voice_channel("general"));
    }

    #[test]
    fn accepts_limits_up_to_99() {
        assert_eq!(parse_user_limit("0"), Ok(0));
        assert_eq!(parse_user_limit(" 99 "), Ok(99));
        assert!(parse_user_limit("100").is_err());
        assert!(parse_user_limit("-1").is_err());
        assert!(parse_user_limit("ten").is_err());
    }

    #[test]
    fn rejects_blank_and_overlong_names() {
        assert_eq!(parse_channel_name("  chill  "), Ok("chill".to_string()));
        assert!(parse_channel_name("   ").is_err());
        assert!(parse_channel_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn interface_is_private_to_owner() {
        let overwrites = interface_overwrites(1, 2, 3);

        assert_eq!(overwrites.len(), 3);
        assert_eq!(
            overwrites[0].kind,
            PermissionOverwriteType::Role(RoleId::new(1))
        );
        assert!(overwrites[0].deny.contains(Permissions::VIEW_CHANNEL));
        assert_eq!(
            overwrites[1].kind,
            PermissionOverwriteType::Member(UserId::new(2))
        );
        assert!(overwrites[1].allow.contains(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn toggles_keep_other_permissions() {
        const GUILD: u64 = 1;

        let locked = VoiceToggle::Lock.everyone_overwrite(&[], GUILD);
        let state = interface_state(&[locked.clone()], GUILD);
        assert_eq!(state, InterfaceState { locked: true, hidden: false });

        let hidden = VoiceToggle::Hide.everyone_overwrite(&[locked], GUILD);
        assert!(hidden.deny.contains(Permissions::CONNECT | Permissions::VIEW_CHANNEL));

        let shown = VoiceToggle::Show.everyone_overwrite(&[hidden], GUILD);
        assert!(shown.allow.contains(Permissions::VIEW_CHANNEL));
        assert_eq!(
            interface_state(&[shown], GUILD),
            InterfaceState { locked: true, hidden: false }
        );
    }

    #[test]
    fn missing_overwrite_means_open_and_visible() {
        assert_eq!(interface_state(&[], 1), InterfaceState::default());
        assert_eq!(
            VoiceToggle::Unlock.apply(InterfaceState { locked: true, hidden: true }),
            InterfaceState { locked: false, hidden: true }
        );
    }

    #[tokio::test]
    async fn hub_replaces_previous_channel() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_temp_voice_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TempVoiceService::new(db);

        service.set_hub(1, 10).await?;
        service.set_hub(1, 11).await?;

        assert!(!service.is_hub(1, 10).await?);
        assert!(service.is_hub(1, 11).await?);
        assert!(!service.is_hub(2, 11).await?);

        Ok(())
    }

    #[tokio::test]
    async fn ending_a_session_returns_it_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_temp_voice_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TempVoiceService::new(db);

        let session = TempVoiceSession {
            voice_channel_id: 100,
            guild_id: 1,
            owner_id: 7,
            interface_channel_id: 101,
        };
        service.open_session(session.clone()).await?;

        assert_eq!(service.session_for_interface(101).await?, Some(session.clone()));
        assert_eq!(service.end_session(100).await?, Some(session));
        assert_eq!(service.end_session(100).await?, None);

        Ok(())
    }
}
