use super::*;

/// Tests deleting an entry.
///
/// Expected: Ok(true) and the entry is gone; deleting again returns Ok(false)
#[tokio::test]
async fn deletes_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FaqEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let entry = factory::create_faq_entry(db, "Delete me?").await?;

    let repo = FaqRepository::new(db);

    assert!(repo.delete(entry.id).await?);
    assert!(repo.find_by_id(entry.id).await?.is_none());
    assert!(!repo.delete(entry.id).await?);

    Ok(())
}
