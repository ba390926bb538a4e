use super::*;

/// Tests closing a case.
///
/// Expected: Ok(true) for the open case, Ok(false) afterwards
#[tokio::test]
async fn deletes_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModmailCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_modmail_case(db, "42").await?;

    let repo = ModmailRepository::new(db);

    assert!(repo.delete_by_user(42).await?);
    assert!(!repo.delete_by_user(42).await?);

    Ok(())
}
