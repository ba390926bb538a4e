use super::*;

/// Tests storing a clan request.
///
/// Verifies the clan is pending, the short description holds the first 20
/// characters and `last_edit` starts at the creation time.
///
/// Expected: Ok(Clan) with accepted = false
#[tokio::test]
async fn creates_pending_clan() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = ClanRepository::new(db);
    let clan = repo.create(param("ABC", "Castle Crew"), now).await?;

    assert_eq!(clan.tag, "ABC");
    assert!(!clan.accepted);
    assert_eq!(clan.short_desc, "We build castles and");
    assert_eq!(clan.full_desc, "We build castles and farms together.");
    assert_eq!(clan.created_at, clan.last_edit);
    assert!(clan.voice_channel_ids.is_empty());

    assert_eq!(
        repo.find_by_owner(42).await?.map(|c| c.tag),
        Some(clan.tag)
    );

    Ok(())
}

/// Tests that a duplicate name is rejected by the unique constraint.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ClanRepository::new(db);
    repo.create(param("ABC", "Castle Crew"), Utc::now()).await?;

    let result = repo.create(param("XYZ", "Castle Crew"), Utc::now()).await;

    assert!(result.is_err());

    Ok(())
}
