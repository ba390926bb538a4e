use super::*;

/// Tests registering a hub and replacing it.
///
/// Verifies that a second upsert for the same guild overwrites the channel.
///
/// Expected: Ok(TempVoiceHub) pointing at the latest channel
#[tokio::test]
async fn upsert_replaces_existing_hub() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_temp_voice_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TempVoiceRepository::new(db);
    repo.upsert_hub(1, 100).await?;
    let hub = repo.upsert_hub(1, 200).await?;

    assert_eq!(hub.channel_id, 200);
    assert_eq!(repo.find_hub(1).await?.map(|h| h.channel_id), Some(200));

    Ok(())
}

/// Tests looking up a hub for a guild without one.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_hub() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_temp_voice_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_hub(db, "1", "100").await?;

    let repo = TempVoiceRepository::new(db);

    assert!(repo.find_hub(2).await?.is_none());

    Ok(())
}
