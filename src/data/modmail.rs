//! Modmail case repository.
//!
//! Each user has at most one open case, enforced by `user_id` being the primary key.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::modmail::ModmailCase;

pub struct ModmailRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModmailRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a case for a user.
    ///
    /// # Returns
    /// - `Ok(ModmailCase)` - The stored case
    /// - `Err(DbErr)` - Database error, including when the user already has a case
    pub async fn create(&self, user_id: u64, channel_id: u64) -> Result<ModmailCase, DbErr> {
        let entity = entity::modmail_case::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
        }
        .insert(self.db)
        .await?;

        ModmailCase::from_entity(entity)
    }

    pub async fn find_by_user(&self, user_id: u64) -> Result<Option<ModmailCase>, DbErr> {
        entity::prelude::ModmailCase::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(ModmailCase::from_entity)
            .transpose()
    }

    pub async fn find_by_channel(&self, channel_id: u64) -> Result<Option<ModmailCase>, DbErr> {
        entity::prelude::ModmailCase::find()
            .filter(entity::modmail_case::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
            .map(ModmailCase::from_entity)
            .transpose()
    }

    /// Closes the user's case.
    ///
    /// # Returns
    /// - `Ok(true)` - A case was deleted
    /// - `Ok(false)` - The user had no open case
    pub async fn delete_by_user(&self, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::ModmailCase::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
