use sea_orm::DbErr;

/// Voice channel that spawns a temporary channel for every member who joins it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempVoiceHub {
    pub guild_id: u64,
    pub channel_id: u64,
}

impl TempVoiceHub {
    pub fn from_entity(entity: entity::temp_voice_hub::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            channel_id: parse_id(&entity.channel_id, "channel_id")?,
        })
    }
}

/// A member-owned temporary voice channel and its control interface channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempVoiceSession {
    pub voice_channel_id: u64,
    pub guild_id: u64,
    pub owner_id: u64,
    pub interface_channel_id: u64,
}

impl TempVoiceSession {
    pub fn from_entity(entity: entity::temp_voice_session::Model) -> Result<Self, DbErr> {
        Ok(Self {
            voice_channel_id: parse_id(&entity.voice_channel_id, "voice_channel_id")?,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            owner_id: parse_id(&entity.owner_id, "owner_id")?,
            interface_channel_id: parse_id(&entity.interface_channel_id, "interface_channel_id")?,
        })
    }
}

fn parse_id(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}
