use super::*;

/// Tests adding members and checking membership.
///
/// Expected: is_member true for added users only
#[tokio::test]
async fn adds_and_checks_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_clan_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (clan, _) = factory::helpers::create_accepted_clan_with_owner(db).await?;
    let owner_id: u64 = clan.owner_id.parse().unwrap();

    let repo = ClanMemberRepository::new(db);
    repo.add(&clan.tag, 77).await?;

    assert!(repo.is_member(&clan.tag, owner_id).await?);
    assert!(repo.is_member(&clan.tag, 77).await?);
    assert!(!repo.is_member(&clan.tag, 78).await?);

    let mut members = repo.get_members(&clan.tag).await?;
    members.sort();
    let mut expected = vec![owner_id, 77];
    expected.sort();
    assert_eq!(members, expected);

    Ok(())
}
