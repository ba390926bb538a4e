//! Ticket repository for database operations.
//!
//! Stores the lifecycle status of every ticket channel. Channels are keyed by their
//! Discord channel ID, so a ticket record disappears together with its channel.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::ticket::{Ticket, TicketStatus};

/// Repository for ticket database operations.
pub struct TicketRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a newly opened ticket.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel created for the ticket
    /// - `user_id` - Member who opened the ticket
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The stored ticket in `open` status
    /// - `Err(DbErr)` - Database error, including a duplicate channel ID
    pub async fn create(&self, channel_id: u64, user_id: u64) -> Result<Ticket, DbErr> {
        let entity = entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(channel_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            claimed_by: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Finds the ticket stored for a channel.
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, DbErr> {
        entity::prelude::Ticket::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Finds an open or claimed ticket created by the user.
    ///
    /// Closed tickets are ignored so a user can open a new ticket once their previous
    /// one has been closed.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The user's active ticket
    /// - `Ok(None)` - The user has no active ticket
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_active_by_user(&self, user_id: u64) -> Result<Option<Ticket>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ticket::Column::Status.is_in([
                TicketStatus::Open.as_str(),
                TicketStatus::Claimed.as_str(),
            ]))
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Updates the status and claimer of a ticket.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel
    /// - `status` - New status
    /// - `claimed_by` - Member who claimed the ticket, `None` to clear
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The updated ticket
    /// - `Ok(None)` - No ticket exists for the channel
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_status(
        &self,
        channel_id: u64,
        status: TicketStatus,
        claimed_by: Option<u64>,
    ) -> Result<Option<Ticket>, DbErr> {
        let Some(existing) = entity::prelude::Ticket::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.claimed_by = ActiveValue::Set(claimed_by.map(|id| id.to_string()));

        let updated = active.update(self.db).await?;

        Ticket::from_entity(updated).map(Some)
    }

    /// Deletes the ticket stored for a channel.
    ///
    /// # Returns
    /// - `Ok(true)` - A ticket was deleted
    /// - `Ok(false)` - No ticket existed for the channel
    pub async fn delete(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::delete_by_id(channel_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
