use super::*;

/// Tests deleting a ticket.
///
/// Verifies the record is removed and a second delete reports nothing deleted.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(1001, 2002).await?;

    assert!(repo.delete(1001).await?);
    assert!(!repo.delete(1001).await?);
    assert!(repo.find_by_channel_id(1001).await?.is_none());

    Ok(())
}
