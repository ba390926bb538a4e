//! Temporary voice repository.
//!
//! Tracks the hub channel per guild and every live temporary channel together with
//! its owner and control interface channel.

use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::temp_voice::{TempVoiceHub, TempVoiceSession};

pub struct TempVoiceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TempVoiceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the hub channel of a guild, replacing any previous hub.
    ///
    /// # Returns
    /// - `Ok(TempVoiceHub)` - The stored hub
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_hub(&self, guild_id: u64, channel_id: u64) -> Result<TempVoiceHub, DbErr> {
        let entity = entity::prelude::TempVoiceHub::insert(entity::temp_voice_hub::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
        })
        .on_conflict(
            OnConflict::column(entity::temp_voice_hub::Column::GuildId)
                .update_column(entity::temp_voice_hub::Column::ChannelId)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        TempVoiceHub::from_entity(entity)
    }

    pub async fn find_hub(&self, guild_id: u64) -> Result<Option<TempVoiceHub>, DbErr> {
        entity::prelude::TempVoiceHub::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(TempVoiceHub::from_entity)
            .transpose()
    }

    /// Records a newly created temporary voice channel.
    pub async fn create_session(&self, session: &TempVoiceSession) -> Result<TempVoiceSession, DbErr> {
        let entity = entity::temp_voice_session::ActiveModel {
            voice_channel_id: ActiveValue::Set(session.voice_channel_id.to_string()),
            guild_id: ActiveValue::Set(session.guild_id.to_string()),
            owner_id: ActiveValue::Set(session.owner_id.to_string()),
            interface_channel_id: ActiveValue::Set(session.interface_channel_id.to_string()),
        }
        .insert(self.db)
        .await?;

        TempVoiceSession::from_entity(entity)
    }

    pub async fn find_session_by_voice_channel(
        &self,
        voice_channel_id: u64,
    ) -> Result<Option<TempVoiceSession>, DbErr> {
        entity::prelude::TempVoiceSession::find_by_id(voice_channel_id.to_string())
            .one(self.db)
            .await?
            .map(TempVoiceSession::from_entity)
            .transpose()
    }

    /// Finds the session controlled from the given interface channel.
    pub async fn find_session_by_interface_channel(
        &self,
        interface_channel_id: u64,
    ) -> Result<Option<TempVoiceSession>, DbErr> {
        entity::prelude::TempVoiceSession::find()
            .filter(
                entity::temp_voice_session::Column::InterfaceChannelId
                    .eq(interface_channel_id.to_string()),
            )
            .one(self.db)
            .await?
            .map(TempVoiceSession::from_entity)
            .transpose()
    }

    pub async fn delete_session(&self, voice_channel_id: u64) -> Result<(), DbErr> {
        entity::prelude::TempVoiceSession::delete_by_id(voice_channel_id.to_string())
            .exec(self.db)
            .await?;
        Ok(())
    }
}
