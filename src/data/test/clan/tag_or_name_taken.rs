use super::*;

/// Tests detecting a taken tag or name.
///
/// Expected: true when either the tag or the name matches, false otherwise
#[tokio::test]
async fn detects_taken_tag_or_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db)
        .tag("ABC")
        .name("Castle Crew")
        .build()
        .await?;

    let repo = ClanRepository::new(db);

    assert!(repo.tag_or_name_taken("ABC", "Other").await?);
    assert!(repo.tag_or_name_taken("XYZ", "Castle Crew").await?);
    assert!(!repo.tag_or_name_taken("XYZ", "Other").await?);

    Ok(())
}

/// Tests that renaming a clan to its own name is not a conflict.
///
/// Expected: false for the owning clan, true for another clan
#[tokio::test]
async fn own_name_is_not_taken_by_other() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db)
        .tag("ABC")
        .name("Castle Crew")
        .build()
        .await?;

    let repo = ClanRepository::new(db);

    assert!(!repo.name_taken_by_other("ABC", "Castle Crew").await?);
    assert!(repo.name_taken_by_other("XYZ", "Castle Crew").await?);

    Ok(())
}
