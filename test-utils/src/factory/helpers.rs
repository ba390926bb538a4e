//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Values are offset into the snowflake range so generated IDs look like Discord IDs.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    100_000_000_000_000_000 + COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an accepted clan with its owner registered as the first member.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((clan, member))` - The clan and the owner's membership
/// - `Err(DbErr)` - Database error during creation
pub async fn create_accepted_clan_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::clan::Model, entity::clan_member::Model), DbErr> {
    let clan = crate::factory::clan::ClanFactory::new(db)
        .accepted(true)
        .build()
        .await?;
    let member =
        crate::factory::clan_member::create_clan_member(db, &clan.tag, &clan.owner_id).await?;

    Ok((clan, member))
}
