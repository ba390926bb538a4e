use super::*;

/// Tests accepting a clan and storing its Discord resources.
///
/// Expected: Ok(Some(Clan)) with every resource ID set
#[tokio::test]
async fn stores_resources_on_accept() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::clan::ClanFactory::new(db).tag("ABC").build().await?;

    let resources = ClanResources {
        category_id: 1,
        admin_role_id: 2,
        member_role_id: 3,
        general_text_id: 4,
        admin_text_id: 5,
        voice_channel_ids: vec![6, 7],
    };

    let repo = ClanRepository::new(db);
    let clan = repo.mark_accepted("ABC", &resources).await?.unwrap();

    assert!(clan.accepted);
    assert_eq!(clan.category_id, Some(1));
    assert_eq!(clan.admin_role_id, Some(2));
    assert_eq!(clan.member_role_id, Some(3));
    assert_eq!(clan.general_text_id, Some(4));
    assert_eq!(clan.admin_text_id, Some(5));
    assert_eq!(clan.voice_channel_ids, vec![6, 7]);

    Ok(())
}

/// Tests accepting an unknown clan.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_tag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ClanRepository::new(db);
    let result = repo
        .mark_accepted("NOPE", &ClanResources::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
