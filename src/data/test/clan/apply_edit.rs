use super::*;

/// Tests editing the description.
///
/// Verifies both descriptions change and `last_edit` is refreshed.
///
/// Expected: Ok(Some(Clan)) with updated descriptions
#[tokio::test]
async fn description_edit_updates_short_desc() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let three_days_ago = Utc::now() - Duration::days(3);
    factory::clan::ClanFactory::new(db)
        .tag("ABC")
        .last_edit(three_days_ago)
        .build()
        .await?;

    let now = Utc::now();
    let repo = ClanRepository::new(db);
    let clan = repo
        .apply_edit(
            "ABC",
            ClanEdit::Description("Now we mostly explore the nether.".to_string()),
            now,
        )
        .await?
        .unwrap();

    assert_eq!(clan.full_desc, "Now we mostly explore the nether.");
    assert_eq!(clan.short_desc, "Now we mostly explor");
    assert!(clan.last_edit > three_days_ago);

    Ok(())
}

/// Tests toggling the approval flag.
///
/// Expected: Ok(Some(Clan)) with approval_required = true
#[tokio::test]
async fn approval_edit_sets_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db).tag("ABC").build().await?;

    let repo = ClanRepository::new(db);
    let clan = repo
        .apply_edit("ABC", ClanEdit::Approval(true), Utc::now())
        .await?
        .unwrap();

    assert!(clan.approval_required);

    Ok(())
}
