use super::*;

/// Tests finding a case by user and by channel.
///
/// Expected: Ok(Some(ModmailCase)) for both lookups
#[tokio::test]
async fn finds_case_by_user_and_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModmailCase)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModmailRepository::new(db);
    let case = repo.create(42, 500).await?;

    assert_eq!(repo.find_by_user(42).await?, Some(case.clone()));
    assert_eq!(repo.find_by_channel(500).await?, Some(case));
    assert!(repo.find_by_user(43).await?.is_none());
    assert!(repo.find_by_channel(501).await?.is_none());

    Ok(())
}
