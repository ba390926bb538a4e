//! Ticket domain models.
//!
//! A ticket is a private support channel opened from the ticket panel. The database
//! only tracks who opened it, its lifecycle status and who claimed it; the channel
//! itself lives on Discord.

use sea_orm::DbErr;
use std::fmt;

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Claimed,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Claimed => "claimed",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "claimed" => Some(Self::Claimed),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Open and claimed tickets block their creator from opening another one.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::Claimed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored ticket record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub channel_id: u64,
    pub user_id: u64,
    pub status: TicketStatus,
    pub claimed_by: Option<u64>,
}

impl Ticket {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored ID or status could not be parsed
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, DbErr> {
        let channel_id = entity
            .channel_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse channel_id: {}", e)))?;
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;
        let status = TicketStatus::parse(&entity.status)
            .ok_or_else(|| DbErr::Custom(format!("Unknown ticket status: {}", entity.status)))?;
        let claimed_by = entity
            .claimed_by
            .map(|id| id.parse::<u64>())
            .transpose()
            .map_err(|e| DbErr::Custom(format!("Failed to parse claimed_by: {}", e)))?;

        Ok(Self {
            channel_id,
            user_id,
            status,
            claimed_by,
        })
    }
}

/// Team roles involved in ticket routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRoles {
    pub supporter: Option<u64>,
    pub moderator: Option<u64>,
    pub administrator: Option<u64>,
    /// Role that can see every ticket regardless of kind.
    pub all_tickets: Option<u64>,
}

impl TeamRoles {
    /// All configured team roles, used to tell team overwrites apart from members.
    pub fn all(&self) -> Vec<u64> {
        [
            self.supporter,
            self.moderator,
            self.administrator,
            self.all_tickets,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Who is pinged and who may see a ticket of a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRouting {
    pub ping_role: Option<u64>,
    pub access_roles: Vec<u64>,
}

/// Reason selected in the ticket panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    UserReport,
    GeneralHelp,
    Application,
    Other,
}

impl TicketKind {
    pub const ALL: [TicketKind; 4] = [
        TicketKind::UserReport,
        TicketKind::GeneralHelp,
        TicketKind::Application,
        TicketKind::Other,
    ];

    /// Select menu value.
    pub fn value(&self) -> &'static str {
        match self {
            Self::UserReport => "user_report",
            Self::GeneralHelp => "general_help",
            Self::Application => "application",
            Self::Other => "other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UserReport => "User report",
            Self::GeneralHelp => "General help",
            Self::Application => "Application",
            Self::Other => "Other",
        }
    }

    /// Short description shown under the label in the select menu.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::UserReport => "Report a user who breaks the rules.",
            Self::GeneralHelp => "Ask general questions about Discord or the server.",
            Self::Application => "Submit your team application.",
            Self::Other => "For every other request.",
        }
    }

    pub fn emoji(&self) -> char {
        match self {
            Self::UserReport => '🚫',
            Self::GeneralHelp => '❓',
            Self::Application => '📝',
            Self::Other => '✉',
        }
    }

    /// Prompt posted in the intro embed of a new ticket.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::UserReport => {
                "Please name the user and provide evidence (screenshots/videos) of the violation."
            }
            Self::GeneralHelp => {
                "Please describe what you need help with in as much detail as possible. The team will help you shortly."
            }
            Self::Application => {
                "Please introduce yourself briefly and describe what you are applying for and why you are a good fit."
            }
            Self::Other => "Please describe your request in as much detail as possible.",
        }
    }

    /// Title of the intro embed.
    pub fn title(&self, display_name: &str) -> String {
        match self {
            Self::UserReport => format!("User report from {}", display_name),
            Self::GeneralHelp => format!("General help for {}", display_name),
            Self::Application => format!("Application from {}", display_name),
            Self::Other => format!("Other request from {}", display_name),
        }
    }

    /// Part of the value before the first underscore, used in channel names.
    pub fn channel_prefix(&self) -> &'static str {
        let value = self.value();
        value.split('_').next().unwrap_or(value)
    }

    pub fn routing(&self, roles: &TeamRoles) -> TicketRouting {
        let access = match self {
            Self::UserReport => vec![roles.moderator, roles.administrator],
            Self::GeneralHelp | Self::Other => {
                vec![roles.supporter, roles.moderator, roles.administrator]
            }
            Self::Application => vec![roles.administrator],
        };
        let ping_role = match self {
            Self::UserReport => roles.moderator,
            Self::GeneralHelp | Self::Other => roles.supporter,
            Self::Application => roles.administrator,
        };

        TicketRouting {
            ping_role,
            access_roles: access.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> TeamRoles {
        TeamRoles {
            supporter: Some(1),
            moderator: Some(2),
            administrator: Some(3),
            all_tickets: Some(4),
        }
    }

    #[test]
    fn routes_user_reports_to_moderators() {
        let routing = TicketKind::UserReport.routing(&roles());

        assert_eq!(routing.ping_role, Some(2));
        assert_eq!(routing.access_roles, vec![2, 3]);
    }

    #[test]
    fn routes_applications_to_administrators_only() {
        let routing = TicketKind::Application.routing(&roles());

        assert_eq!(routing.ping_role, Some(3));
        assert_eq!(routing.access_roles, vec![3]);
    }

    #[test]
    fn other_matches_general_help() {
        assert_eq!(
            TicketKind::Other.routing(&roles()),
            TicketKind::GeneralHelp.routing(&roles())
        );
    }

    #[test]
    fn skips_unconfigured_roles() {
        let partial = TeamRoles {
            moderator: Some(2),
            ..Default::default()
        };

        let routing = TicketKind::GeneralHelp.routing(&partial);

        assert_eq!(routing.ping_role, None);
        assert_eq!(routing.access_roles, vec![2]);
    }

    #[test]
    fn channel_prefix_stops_at_underscore() {
        assert_eq!(TicketKind::UserReport.channel_prefix(), "user");
        assert_eq!(TicketKind::Other.channel_prefix(), "other");
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [TicketStatus::Open, TicketStatus::Claimed, TicketStatus::Closed] {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
        assert!(!TicketStatus::Closed.is_active());
    }
}
