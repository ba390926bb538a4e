//! Temporary voice factories for hubs and active sessions.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a temporary voice hub registration for a guild.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the hub belongs to
/// - `channel_id` - Voice channel acting as the hub
pub async fn create_hub(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
) -> Result<entity::temp_voice_hub::Model, DbErr> {
    entity::temp_voice_hub::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
    }
    .insert(db)
    .await
}

/// Factory for creating test temporary voice sessions.
pub struct TempVoiceSessionFactory<'a> {
    db: &'a DatabaseConnection,
    voice_channel_id: String,
    guild_id: String,
    owner_id: String,
    interface_channel_id: String,
}

impl<'a> TempVoiceSessionFactory<'a> {
    /// Creates a new factory where every ID is freshly generated.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            voice_channel_id: next_id().to_string(),
            guild_id: next_id().to_string(),
            owner_id: next_id().to_string(),
            interface_channel_id: next_id().to_string(),
        }
    }

    pub fn voice_channel_id(mut self, id: impl Into<String>) -> Self {
        self.voice_channel_id = id.into();
        self
    }

    pub fn guild_id(mut self, id: impl Into<String>) -> Self {
        self.guild_id = id.into();
        self
    }

    pub fn owner_id(mut self, id: impl Into<String>) -> Self {
        self.owner_id = id.into();
        self
    }

    pub fn interface_channel_id(mut self, id: impl Into<String>) -> Self {
        self.interface_channel_id = id.into();
        self
    }

    pub async fn build(self) -> Result<entity::temp_voice_session::Model, DbErr> {
        entity::temp_voice_session::ActiveModel {
            voice_channel_id: ActiveValue::Set(self.voice_channel_id),
            guild_id: ActiveValue::Set(self.guild_id),
            owner_id: ActiveValue::Set(self.owner_id),
            interface_channel_id: ActiveValue::Set(self.interface_channel_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a temporary voice session owned by `owner_id`.
pub async fn create_session(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<entity::temp_voice_session::Model, DbErr> {
    TempVoiceSessionFactory::new(db)
        .owner_id(owner_id)
        .build()
        .await
}
