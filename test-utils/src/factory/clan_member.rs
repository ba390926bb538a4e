//! Clan member factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Registers `user_id` as a member of the clan with `tag`.
///
/// The referenced clan must already exist.
pub async fn create_clan_member(
    db: &DatabaseConnection,
    tag: &str,
    user_id: &str,
) -> Result<entity::clan_member::Model, DbErr> {
    entity::clan_member::ActiveModel {
        tag: ActiveValue::Set(tag.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}
