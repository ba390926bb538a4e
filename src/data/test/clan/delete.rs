use super::*;

/// Tests deleting a clan.
///
/// Expected: Ok(true) and the clan is gone
#[tokio::test]
async fn deletes_clan() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db).tag("ABC").build().await?;

    let repo = ClanRepository::new(db);

    assert!(repo.delete("ABC").await?);
    assert!(repo.find_by_tag("ABC").await?.is_none());
    assert!(!repo.delete("ABC").await?);

    Ok(())
}
