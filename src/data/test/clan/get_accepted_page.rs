use super::*;

/// Tests paging through accepted clans ordered by tag.
///
/// Verifies pending clans are skipped and the total only counts accepted clans.
///
/// Expected: one clan per index, None past the end
#[tokio::test]
async fn pages_accepted_clans_by_tag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db)
        .tag("BBB")
        .accepted(true)
        .build()
        .await?;
    factory::clan::ClanFactory::new(db)
        .tag("AAA")
        .accepted(true)
        .build()
        .await?;
    factory::clan::ClanFactory::new(db)
        .tag("CCC")
        .accepted(false)
        .build()
        .await?;

    let repo = ClanRepository::new(db);

    let (first, total) = repo.get_accepted_page(0).await?;
    assert_eq!(total, 2);
    assert_eq!(first.map(|c| c.tag), Some("AAA".to_string()));

    let (second, _) = repo.get_accepted_page(1).await?;
    assert_eq!(second.map(|c| c.tag), Some("BBB".to_string()));

    let (past_end, _) = repo.get_accepted_page(2).await?;
    assert!(past_end.is_none());

    Ok(())
}
