use super::*;

/// Tests opening a modmail case.
///
/// Expected: Ok(ModmailCase)
#[tokio::test]
async fn creates_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModmailCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModmailRepository::new(db);
    let case = repo.create(42, 500).await?;

    assert_eq!(case.user_id, 42);
    assert_eq!(case.channel_id, 500);

    Ok(())
}

/// Tests that a user cannot have two open cases.
///
/// Expected: Err(DbErr) due to the unique user constraint
#[tokio::test]
async fn rejects_second_case_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModmailCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_modmail_case(db, "42").await?;

    let repo = ModmailRepository::new(db);

    assert!(repo.create(42, 501).await.is_err());

    Ok(())
}
