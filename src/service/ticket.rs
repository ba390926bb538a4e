//! Ticket service for business logic.
//!
//! Covers the database side of the ticket lifecycle and the pure rules deciding
//! channel names, claim transitions and permission overwrites. Discord calls are made
//! by the bot layer with the results.

use sea_orm::DatabaseConnection;
use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};

use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{Ticket, TicketKind, TicketStatus},
    util::text::truncate_chars,
};

/// Discord's channel name length limit.
const MAX_CHANNEL_NAME_LENGTH: usize = 100;

/// Prefix shared by every ticket channel name.
pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";

/// Result of pressing the claim button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The invoker claimed the ticket.
    Claimed(Ticket),
    /// The invoker released their claim.
    Released(Ticket),
    /// Someone else already holds the claim.
    ClaimedByOther(u64),
}

/// Service providing business logic for tickets.
pub struct TicketService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    /// Creates a new TicketService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the user's open or claimed ticket, which blocks opening another one.
    pub async fn active_ticket(&self, user_id: u64) -> Result<Option<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db)
            .find_active_by_user(user_id)
            .await?)
    }

    pub async fn get(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await?)
    }

    /// Records a ticket for a freshly created channel.
    pub async fn register(&self, channel_id: u64, user_id: u64) -> Result<Ticket, AppError> {
        Ok(TicketRepository::new(self.db)
            .create(channel_id, user_id)
            .await?)
    }

    /// Toggles the claim on a ticket.
    ///
    /// An unclaimed ticket becomes claimed by the invoker; the invoker's own claim is
    /// released back to open.
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome)` - The transition that was applied, or who blocks it
    /// - `Err(AppError::NotFound)` - The channel is not a known ticket
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn toggle_claim(
        &self,
        channel_id: u64,
        invoker_id: u64,
    ) -> Result<ClaimOutcome, AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = repo
            .find_by_channel_id(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found in the database.".to_string()))?;

        let (status, claimed_by) = match ticket.claimed_by {
            None => (TicketStatus::Claimed, Some(invoker_id)),
            Some(claimer) if claimer == invoker_id => (TicketStatus::Open, None),
            Some(claimer) => return Ok(ClaimOutcome::ClaimedByOther(claimer)),
        };

        let updated = repo
            .set_status(channel_id, status, claimed_by)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found in the database.".to_string()))?;

        Ok(match status {
            TicketStatus::Claimed => ClaimOutcome::Claimed(updated),
            _ => ClaimOutcome::Released(updated),
        })
    }

    /// Marks a ticket closed and clears its claim.
    pub async fn close(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db)
            .set_status(channel_id, TicketStatus::Closed, None)
            .await?)
    }

    /// Marks a closed ticket open again.
    pub async fn reopen(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db)
            .set_status(channel_id, TicketStatus::Open, None)
            .await?)
    }

    pub async fn delete(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(TicketRepository::new(self.db).delete(channel_id).await?)
    }
}

/// Builds the channel name `ticket-<prefix>-<username>`, lowercased and limited to
/// Discord's 100 character maximum.
pub fn channel_name(kind: TicketKind, username: &str) -> String {
    let name = format!(
        "{}{}-{}",
        TICKET_CHANNEL_PREFIX,
        kind.channel_prefix(),
        username
    )
    .to_lowercase();

    truncate_chars(&name, MAX_CHANNEL_NAME_LENGTH)
}

/// Whether a channel looks like a ticket channel.
pub fn is_ticket_channel(name: &str) -> bool {
    name.starts_with(TICKET_CHANNEL_PREFIX)
}

fn read_write() -> Permissions {
    Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY
}

fn read_only() -> Permissions {
    Permissions::VIEW_CHANNEL | Permissions::READ_MESSAGE_HISTORY
}

/// Overwrite letting a member see and write in a ticket.
pub fn member_access(user_id: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: read_write(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(UserId::new(user_id)),
    }
}

/// Overwrite hiding a ticket from a member.
pub fn member_denied(user_id: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Member(UserId::new(user_id)),
    }
}

/// Overwrite letting a team role see and write in a ticket.
pub fn role_access(role_id: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: read_write(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(RoleId::new(role_id)),
    }
}

/// Initial overwrites of a new ticket channel.
///
/// `@everyone` (whose role ID equals the guild ID) is denied view; the creator, the
/// bot and every access role may read and write.
pub fn opening_overwrites(
    guild_id: u64,
    creator_id: u64,
    bot_id: u64,
    access_roles: &[u64],
) -> Vec<PermissionOverwrite> {
    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
        },
        member_access(creator_id),
        member_access(bot_id),
    ];

    let mut seen = Vec::new();
    for role_id in access_roles {
        if !seen.contains(role_id) {
            seen.push(*role_id);
            overwrites.push(role_access(*role_id));
        }
    }

    overwrites
}

fn is_team_or_bot(kind: &PermissionOverwriteType, team_roles: &[u64], bot_id: u64) -> bool {
    match kind {
        PermissionOverwriteType::Role(role_id) => team_roles.contains(&role_id.get()),
        PermissionOverwriteType::Member(user_id) => user_id.get() == bot_id,
        _ => false,
    }
}

fn is_target(kind: &PermissionOverwriteType, user_id: u64) -> bool {
    matches!(kind, PermissionOverwriteType::Member(id) if id.get() == user_id)
}

/// Overwrites to apply when closing a ticket.
///
/// Every non-team, non-bot target that may currently write keeps read access but
/// loses send permission; the creator always does.
pub fn closing_overwrites(
    current: &[PermissionOverwrite],
    creator_id: u64,
    bot_id: u64,
    team_roles: &[u64],
) -> Vec<PermissionOverwrite> {
    let mut result: Vec<PermissionOverwrite> = current
        .iter()
        .filter(|overwrite| !is_team_or_bot(&overwrite.kind, team_roles, bot_id))
        .filter(|overwrite| !is_target(&overwrite.kind, creator_id))
        .filter(|overwrite| overwrite.allow.contains(Permissions::SEND_MESSAGES))
        .map(|overwrite| PermissionOverwrite {
            allow: read_only(),
            deny: Permissions::SEND_MESSAGES,
            kind: overwrite.kind,
        })
        .collect();

    result.push(PermissionOverwrite {
        allow: read_only(),
        deny: Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Member(UserId::new(creator_id)),
    });

    result
}

/// Overwrites to apply when reopening a ticket.
///
/// Every non-team, non-bot target that can still view the channel gets write access
/// back, as does the creator.
pub fn reopening_overwrites(
    current: &[PermissionOverwrite],
    creator_id: u64,
    bot_id: u64,
    team_roles: &[u64],
) -> Vec<PermissionOverwrite> {
    let mut result: Vec<PermissionOverwrite> = current
        .iter()
        .filter(|overwrite| !is_team_or_bot(&overwrite.kind, team_roles, bot_id))
        .filter(|overwrite| !is_target(&overwrite.kind, creator_id))
        .filter(|overwrite| overwrite.allow.contains(Permissions::VIEW_CHANNEL))
        .map(|overwrite| PermissionOverwrite {
            allow: read_write(),
            deny: Permissions::empty(),
            kind: overwrite.kind,
        })
        .collect();

    result.push(member_access(creator_id));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    const CREATOR: u64 = 10;
    const BOT: u64 = 11;
    const HELPER: u64 = 12;
    const TEAM_ROLE: u64 = 20;
    const EVERYONE: u64 = 1;

    fn current() -> Vec<PermissionOverwrite> {
        vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(RoleId::new(EVERYONE)),
            },
            member_access(CREATOR),
            member_access(BOT),
            member_access(HELPER),
            PermissionOverwrite {
                allow: read_write(),
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(RoleId::new(TEAM_ROLE)),
            },
        ]
    }

    #[test]
    fn opening_hides_channel_from_everyone() {
        let overwrites = opening_overwrites(EVERYONE, CREATOR, BOT, &[TEAM_ROLE, 21, TEAM_ROLE]);

        let targets: Vec<PermissionOverwriteType> = overwrites.iter().map(|o| o.kind).collect();
        assert_eq!(
            targets,
            vec![
                PermissionOverwriteType::Role(RoleId::new(EVERYONE)),
                PermissionOverwriteType::Member(UserId::new(CREATOR)),
                PermissionOverwriteType::Member(UserId::new(BOT)),
                PermissionOverwriteType::Role(RoleId::new(TEAM_ROLE)),
                PermissionOverwriteType::Role(RoleId::new(21)),
            ]
        );
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert!(overwrites[1..].iter().all(|o| o.allow == read_write()));
    }

    #[test]
    fn builds_lowercase_channel_name() {
        assert_eq!(
            channel_name(TicketKind::GeneralHelp, "SomeUser"),
            "ticket-general-someuser"
        );
    }

    #[test]
    fn truncates_long_channel_names() {
        let name = channel_name(TicketKind::Application, &"x".repeat(200));

        assert_eq!(name.chars().count(), 100);
        assert!(name.starts_with("ticket-application-"));
        assert!(is_ticket_channel(&name));
    }

    #[test]
    fn closing_revokes_send_from_members_only() {
        let result = closing_overwrites(&current(), CREATOR, BOT, &[TEAM_ROLE]);

        let targets: Vec<PermissionOverwriteType> = result.iter().map(|o| o.kind).collect();
        assert_eq!(
            targets,
            vec![
                PermissionOverwriteType::Member(UserId::new(HELPER)),
                PermissionOverwriteType::Member(UserId::new(CREATOR)),
            ]
        );
        for overwrite in result {
            assert!(overwrite.deny.contains(Permissions::SEND_MESSAGES));
            assert!(overwrite.allow.contains(Permissions::VIEW_CHANNEL));
            assert!(overwrite.allow.contains(Permissions::READ_MESSAGE_HISTORY));
        }
    }

    #[test]
    fn reopening_restores_send_for_viewers() {
        let closed = closing_overwrites(&current(), CREATOR, BOT, &[TEAM_ROLE]);

        let result = reopening_overwrites(&closed, CREATOR, BOT, &[TEAM_ROLE]);

        assert_eq!(result.len(), 2);
        for overwrite in result {
            assert_eq!(overwrite.allow, read_write());
            assert!(overwrite.deny.is_empty());
        }
    }

    #[tokio::test]
    async fn claim_toggles_between_claimed_and_open() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = factory::create_ticket(db).await?;
        let channel_id: u64 = ticket.channel_id.parse().unwrap();
        let service = TicketService::new(db);

        let claimed = service.toggle_claim(channel_id, 5).await?;
        assert!(matches!(
            claimed,
            ClaimOutcome::Claimed(Ticket { status: TicketStatus::Claimed, claimed_by: Some(5), .. })
        ));

        let blocked = service.toggle_claim(channel_id, 6).await?;
        assert_eq!(blocked, ClaimOutcome::ClaimedByOther(5));

        let released = service.toggle_claim(channel_id, 5).await?;
        assert!(matches!(
            released,
            ClaimOutcome::Released(Ticket { status: TicketStatus::Open, claimed_by: None, .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn claim_on_unknown_channel_is_not_found() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db).toggle_claim(404, 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
