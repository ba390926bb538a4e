use super::*;

/// Tests creating a session and finding it by both of its channels.
///
/// Expected: Ok(Some(TempVoiceSession)) for voice and interface lookups
#[tokio::test]
async fn finds_session_by_voice_and_interface_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_temp_voice_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TempVoiceRepository::new(db);
    let session = repo
        .create_session(&TempVoiceSession {
            voice_channel_id: 10,
            guild_id: 1,
            owner_id: 42,
            interface_channel_id: 11,
        })
        .await?;

    assert_eq!(
        repo.find_session_by_voice_channel(10).await?,
        Some(session.clone())
    );
    assert_eq!(
        repo.find_session_by_interface_channel(11).await?,
        Some(session)
    );
    assert!(repo.find_session_by_interface_channel(10).await?.is_none());

    Ok(())
}

/// Tests deleting a session.
///
/// Expected: Ok(()) and the session is no longer found
#[tokio::test]
async fn deletes_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_temp_voice_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::create_session(db, "42").await?;
    let voice_channel_id: u64 = session.voice_channel_id.parse().unwrap();

    let repo = TempVoiceRepository::new(db);
    repo.delete_session(voice_channel_id).await?;

    assert!(repo
        .find_session_by_voice_channel(voice_channel_id)
        .await?
        .is_none());

    Ok(())
}
