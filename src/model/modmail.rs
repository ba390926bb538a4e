use sea_orm::DbErr;

/// Open modmail conversation between a user's DMs and a staff channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModmailCase {
    pub user_id: u64,
    pub channel_id: u64,
}

impl ModmailCase {
    pub fn from_entity(entity: entity::modmail_case::Model) -> Result<Self, DbErr> {
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;
        let channel_id = entity
            .channel_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse channel_id: {}", e)))?;

        Ok(Self {
            user_id,
            channel_id,
        })
    }
}
