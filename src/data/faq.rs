//! FAQ entry repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    QuerySelect,
};

use crate::model::faq::{CreateFaqEntryParam, FaqEntry};

pub struct FaqRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FaqRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateFaqEntryParam) -> Result<FaqEntry, DbErr> {
        let entity = entity::faq_entry::ActiveModel {
            question: ActiveValue::Set(param.question),
            answer: ActiveValue::Set(param.answer),
            added_by: ActiveValue::Set(param.added_by.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        FaqEntry::from_entity(entity)
    }

    /// Gets the oldest entries first, at most `limit` of them.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of entries, e.g. the 25 options a select menu allows
    pub async fn get_all(&self, limit: u64) -> Result<Vec<FaqEntry>, DbErr> {
        entity::prelude::FaqEntry::find()
            .order_by_asc(entity::faq_entry::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(FaqEntry::from_entity)
            .collect()
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<FaqEntry>, DbErr> {
        entity::prelude::FaqEntry::find_by_id(id)
            .one(self.db)
            .await?
            .map(FaqEntry::from_entity)
            .transpose()
    }

    /// Deletes an entry.
    ///
    /// # Returns
    /// - `Ok(true)` - The entry was deleted
    /// - `Ok(false)` - No entry with that ID existed
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::FaqEntry::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
