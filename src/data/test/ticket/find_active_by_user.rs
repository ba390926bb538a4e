use super::*;

/// Tests finding an open ticket for a user.
///
/// Expected: Ok(Some(Ticket))
#[tokio::test]
async fn finds_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db)
        .user_id("42")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_active_by_user(42).await?;

    assert_eq!(
        found.map(|t| t.channel_id.to_string()),
        Some(ticket.channel_id)
    );

    Ok(())
}

/// Tests that claimed tickets count as active.
///
/// Expected: Ok(Some(Ticket)) with status Claimed
#[tokio::test]
async fn finds_claimed_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .user_id("42")
        .status("claimed")
        .claimed_by(Some("7".to_string()))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_active_by_user(42).await?.unwrap();

    assert_eq!(found.status, TicketStatus::Claimed);
    assert_eq!(found.claimed_by, Some(7));

    Ok(())
}

/// Tests that closed tickets and other users' tickets are ignored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_closed_and_foreign_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .user_id("42")
        .status("closed")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db)
        .user_id("43")
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(repo.find_active_by_user(42).await?.is_none());

    Ok(())
}
