use sea_orm::DatabaseConnection;

use crate::{
    data::faq::FaqRepository,
    error::AppError,
    model::faq::{CreateFaqEntryParam, FaqEntry, MAX_QUESTION_LENGTH},
    util::text::truncate_chars,
};

/// Discord allows at most 25 options in a select menu.
pub const MAX_SELECT_OPTIONS: u64 = 25;

/// Select option label limit.
const MAX_LABEL_LENGTH: usize = 100;

/// Value of the placeholder option shown when no entries exist.
pub const EMPTY_OPTION_VALUE: &str = "no_faq";

pub struct FaqService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FaqService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new entry submitted through the add modal.
    ///
    /// # Returns
    /// - `Ok(FaqEntry)` - The stored entry
    /// - `Err(AppError::BadRequest)` - Question or answer is blank, or the question is too long
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn add(
        &self,
        question: &str,
        answer: &str,
        added_by: u64,
    ) -> Result<FaqEntry, AppError> {
        let question = question.trim();
        let answer = answer.trim();

        if question.is_empty() || answer.is_empty() {
            return Err(AppError::BadRequest(
                "❌ Question and answer must not be empty.".to_string(),
            ));
        }
        if question.chars().count() > MAX_QUESTION_LENGTH {
            return Err(AppError::BadRequest(format!(
                "❌ The question can be at most {} characters long.",
                MAX_QUESTION_LENGTH
            )));
        }

        Ok(FaqRepository::new(self.db)
            .create(CreateFaqEntryParam {
                question: question.to_string(),
                answer: answer.to_string(),
                added_by,
            })
            .await?)
    }

    /// Gets the entries that fit into one select menu.
    pub async fn selectable(&self) -> Result<Vec<FaqEntry>, AppError> {
        Ok(FaqRepository::new(self.db)
            .get_all(MAX_SELECT_OPTIONS)
            .await?)
    }

    /// Gets an entry by the value of its select option.
    ///
    /// # Returns
    /// - `Ok(Some(entry))` - The entry exists
    /// - `Ok(None)` - The value is not an ID or the entry was deleted since the panel was sent
    pub async fn get(&self, option_value: &str) -> Result<Option<FaqEntry>, AppError> {
        let Ok(id) = option_value.parse::<i32>() else {
            return Ok(None);
        };

        Ok(FaqRepository::new(self.db).find_by_id(id).await?)
    }

    /// Deletes an entry by the value of its select option.
    pub async fn remove(&self, option_value: &str) -> Result<Option<FaqEntry>, AppError> {
        let Some(entry) = self.get(option_value).await? else {
            return Ok(None);
        };

        FaqRepository::new(self.db).delete(entry.id).await?;

        Ok(Some(entry))
    }
}

/// Select option label for an entry.
pub fn option_label(entry: &FaqEntry) -> String {
    truncate_chars(&entry.question, MAX_LABEL_LENGTH)
}

pub fn format_answer(entry: &FaqEntry) -> String {
    format!("**Question:** {}\n\n**Answer:** {}", entry.question, entry.answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn add_rejects_blank_and_long_questions() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::FaqEntry)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = FaqService::new(db);

        assert!(matches!(
            service.add("  ", "answer", 1).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.add(&"q".repeat(101), "answer", 1).await,
            Err(AppError::BadRequest(_))
        ));

        let entry = service.add(" How do I join? ", "Click the button.", 1).await?;
        assert_eq!(entry.question, "How do I join?");

        Ok(())
    }

    #[tokio::test]
    async fn selectable_is_capped_at_25() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::FaqEntry)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        for i in 0..30 {
            factory::create_faq_entry(db, &format!("Question {}", i)).await?;
        }

        let entries = FaqService::new(db).selectable().await?;

        assert_eq!(entries.len(), 25);
        assert_eq!(entries[0].question, "Question 0");

        Ok(())
    }

    #[tokio::test]
    async fn remove_returns_deleted_entry() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::FaqEntry)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = FaqService::new(db);

        let created = factory::create_faq_entry(db, "Where are the rules?").await?;
        let value = created.id.to_string();

        let removed = service.remove(&value).await?;
        assert_eq!(removed.map(|entry| entry.question), Some(created.question));
        assert!(service.get(&value).await?.is_none());
        assert!(service.get(EMPTY_OPTION_VALUE).await?.is_none());

        Ok(())
    }

    #[test]
    fn formats_entries() {
        let entry = FaqEntry {
            id: 1,
            question: "q".repeat(120),
            answer: "a".to_string(),
            added_by: 1,
        };

        assert_eq!(option_label(&entry).chars().count(), 100);
        assert!(format_answer(&entry).ends_with("**Answer:** a"));
    }
}
