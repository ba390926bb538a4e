use super::*;

/// Tests listing entries in insertion order with a limit.
///
/// Expected: Ok(Vec<FaqEntry>) holding the oldest `limit` entries
#[tokio::test]
async fn lists_oldest_entries_up_to_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FaqEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for question in ["First?", "Second?", "Third?"] {
        factory::create_faq_entry(db, question).await?;
    }

    let repo = FaqRepository::new(db);
    let entries = repo.get_all(2).await?;

    let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
    assert_eq!(questions, vec!["First?", "Second?"]);

    Ok(())
}

/// Tests listing with no entries.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn returns_empty_list() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FaqEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FaqRepository::new(db);

    assert!(repo.get_all(25).await?.is_empty());

    Ok(())
}
