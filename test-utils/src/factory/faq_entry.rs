//! FAQ entry factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an FAQ entry with the given question and a generated answer.
///
/// # Arguments
/// - `db` - Database connection
/// - `question` - Question text shown in the FAQ menu
pub async fn create_faq_entry(
    db: &DatabaseConnection,
    question: &str,
) -> Result<entity::faq_entry::Model, DbErr> {
    entity::faq_entry::ActiveModel {
        question: ActiveValue::Set(question.to_string()),
        answer: ActiveValue::Set(format!("Answer to: {}", question)),
        added_by: ActiveValue::Set(next_id().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}
