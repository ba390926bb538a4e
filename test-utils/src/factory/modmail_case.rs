//! Modmail case factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Opens a modmail case for `user_id` bound to a freshly generated channel ID.
pub async fn create_modmail_case(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entity::modmail_case::Model, DbErr> {
    entity::modmail_case::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        channel_id: ActiveValue::Set(next_id().to_string()),
    }
    .insert(db)
    .await
}
