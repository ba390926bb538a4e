use sea_orm::DbErr;

/// Maximum length of an FAQ question, matching Discord's select option label limit.
pub const MAX_QUESTION_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub added_by: u64,
}

impl FaqEntry {
    pub fn from_entity(entity: entity::faq_entry::Model) -> Result<Self, DbErr> {
        let added_by = entity
            .added_by
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse added_by: {}", e)))?;

        Ok(Self {
            id: entity.id,
            question: entity.question,
            answer: entity.answer,
            added_by,
        })
    }
}

/// Parameters for storing a new FAQ entry.
#[derive(Debug, Clone)]
pub struct CreateFaqEntryParam {
    pub question: String,
    pub answer: String,
    pub added_by: u64,
}
