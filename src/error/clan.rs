use thiserror::Error;

/// Clan request or edit rejected for a reason the member can fix.
///
/// The display text is sent back to the member as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClanError {
    #[error("❌ You already own the clan **{name} [{tag}]**.")]
    AlreadyOwner { name: String, tag: String },

    #[error("❌ You do not own a clan.")]
    NotOwner,

    #[error("❌ **Invalid HEX code.** Please use the format #RRGGBB.")]
    InvalidColor,

    #[error("❌ **Invalid approval value.** Please enter 'yes' or 'no'.")]
    InvalidApproval,

    #[error("❌ **Invalid clan tag.** Use 1 to 5 letters, digits or underscores.")]
    InvalidTag,

    #[error("❌ The field **{0}** must not be empty.")]
    EmptyField(&'static str),

    #[error("❌ The clan tag **{0}** already exists.")]
    TagTaken(String),

    #[error("❌ The clan name **{0}** already exists.")]
    NameTaken(String),

    #[error("❌ Clan **{0}** was not found.")]
    NotFound(String),

    #[error("⚠️ Clan **{0}** has already been accepted.")]
    AlreadyAccepted(String),

    #[error("❌ You can only edit your clan every 2 days. Time remaining: **{0}**.")]
    EditCooldown(String),
}
