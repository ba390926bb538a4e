use super::*;

/// Tests storing an FAQ entry.
///
/// Expected: Ok(FaqEntry) retrievable by its generated ID
#[tokio::test]
async fn creates_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FaqEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FaqRepository::new(db);
    let entry = repo
        .create(CreateFaqEntryParam {
            question: "How do I join?".to_string(),
            answer: "Use the join button.".to_string(),
            added_by: 7,
        })
        .await?;

    assert_eq!(entry.question, "How do I join?");
    assert_eq!(entry.added_by, 7);
    assert_eq!(repo.find_by_id(entry.id).await?, Some(entry));

    Ok(())
}
