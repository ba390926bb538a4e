use super::*;

/// Tests claiming a ticket.
///
/// Expected: Ok(Some(Ticket)) with status Claimed and the claimer recorded
#[tokio::test]
async fn claims_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(1001, 2002).await?;

    let updated = repo
        .set_status(1001, TicketStatus::Claimed, Some(3003))
        .await?
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Claimed);
    assert_eq!(updated.claimed_by, Some(3003));

    Ok(())
}

/// Tests closing a claimed ticket clears the claimer.
///
/// Expected: Ok(Some(Ticket)) with status Closed and no claimer
#[tokio::test]
async fn closing_clears_claimer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db)
        .status("claimed")
        .claimed_by(Some("5".to_string()))
        .build()
        .await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);
    let updated = repo
        .set_status(channel_id, TicketStatus::Closed, None)
        .await?
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Closed);
    assert!(updated.claimed_by.is_none());

    Ok(())
}

/// Tests updating a ticket that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo.set_status(999, TicketStatus::Open, None).await?;

    assert!(result.is_none());

    Ok(())
}
