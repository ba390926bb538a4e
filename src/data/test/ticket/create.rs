use super::*;

/// Tests creating a ticket.
///
/// Verifies that a new ticket is stored in open status without a claimer.
///
/// Expected: Ok(Ticket) with status Open
#[tokio::test]
async fn creates_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(1001, 2002).await?;

    assert_eq!(ticket.channel_id, 1001);
    assert_eq!(ticket.user_id, 2002);
    assert_eq!(ticket.status, TicketStatus::Open);
    assert!(ticket.claimed_by.is_none());

    let stored = repo.find_by_channel_id(1001).await?;
    assert_eq!(stored, Some(ticket));

    Ok(())
}

/// Tests creating two tickets for the same channel.
///
/// Expected: Err(DbErr) due to the primary key constraint
#[tokio::test]
async fn rejects_duplicate_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(1001, 2002).await?;

    let result = repo.create(1001, 3003).await;

    assert!(result.is_err());

    Ok(())
}
