//! Welcome, boost and alt-account messages.
//!
//! Everything here is pure: the bot handlers collect the member data, these functions
//! decide what to post and build the embeds.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serenity::all::{Colour, CreateEmbed, CreateMessage};

/// Accounts younger than this are flagged as possible alts.
pub const NEW_ACCOUNT_WEEKS: i64 = 3;

/// Why a joining account looks like an alt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltReason {
    NewAccount,
    NoAvatar,
}

impl AltReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewAccount => "New account",
            Self::NoAvatar => "No profile picture",
        }
    }
}

/// Flags an account that is younger than three weeks or has no avatar.
///
/// An empty result means the account is not suspicious.
pub fn classify_account(
    created_at: DateTime<Utc>,
    has_avatar: bool,
    now: DateTime<Utc>,
) -> Vec<AltReason> {
    let mut reasons = Vec::new();

    if created_at > now - Duration::weeks(NEW_ACCOUNT_WEEKS) {
        reasons.push(AltReason::NewAccount);
    }
    if !has_avatar {
        reasons.push(AltReason::NoAvatar);
    }

    reasons
}

/// Whether a guild update raised the boost count.
pub fn boost_increased(before: Option<u64>, after: Option<u64>) -> bool {
    after.unwrap_or(0) > before.unwrap_or(0)
}

/// Finds a member whose boost started on `today`.
///
/// # Arguments
/// - `members` - Pairs of user ID and the time the member started boosting
pub fn find_todays_booster(
    members: impl IntoIterator<Item = (u64, Option<DateTime<Utc>>)>,
    today: NaiveDate,
) -> Option<u64> {
    members
        .into_iter()
        .find(|(_, since)| since.is_some_and(|since| since.date_naive() == today))
        .map(|(user_id, _)| user_id)
}

pub fn welcome_embed(user_id: u64, avatar_url: Option<String>) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title("Welcome! 👋")
        .description(format!(
            "Welcome to the TradiaSMP Discord server, <@{}>. Please follow our rules and join the Minecraft server. Have fun!",
            user_id
        ))
        .colour(Colour::BLUE);

    match avatar_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

pub fn boost_message(user_id: u64) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("✨ Server Boost! ✨")
        .description(format!(
            "Thank you <@{}> for the boost! We really appreciate your support!",
            user_id
        ))
        .colour(Colour::MAGENTA);

    CreateMessage::new()
        .content(format!("<@{}>", user_id))
        .embed(embed)
}

/// Team channel alert for a possible alt account, pinging the team role if configured.
pub fn alt_alert_message(
    user_id: u64,
    reasons: &[AltReason],
    ping_role_id: Option<u64>,
) -> CreateMessage {
    let reason_text = reasons
        .iter()
        .map(|reason| reason.label())
        .collect::<Vec<_>>()
        .join(",\n");

    let embed = CreateEmbed::new()
        .title("Possible alt account!")
        .description(format!(
            "The user <@{}> joined the server and may be an alt account.",
            user_id
        ))
        .field("__📄 Reason:__", reason_text, false)
        .colour(Colour::ORANGE);

    let message = CreateMessage::new().embed(embed);
    match ping_role_id {
        Some(role_id) => message.content(format!("<@&{}>", role_id)),
        None => message,
    }
}
