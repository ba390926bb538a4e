//! Clan service for business logic.
//!
//! Validates clan requests and edits, enforces ownership and the edit cooldown, and
//! names the Discord resources created for an accepted clan. Creating those resources
//! is left to the bot layer, which reports them back through [`ClanService::accept`].

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use sea_orm::DatabaseConnection;
use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId};

use crate::{
    data::clan::{ClanMemberRepository, ClanRepository},
    error::{clan::ClanError, AppError},
    model::clan::{Clan, ClanEdit, ClanField, ClanResources, CreateClanParam},
};

/// Minimum time between two edits of the same clan.
pub const EDIT_COOLDOWN_DAYS: i64 = 2;

pub const MAX_TAG_LENGTH: usize = 5;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

static TITLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9_]{1,5})\]$").expect("title tag pattern is valid")
});

/// Raw values submitted through the clan creation modal.
#[derive(Debug, Clone, Default)]
pub struct ClanRequestInput {
    pub name: String,
    pub tag: String,
    pub color: String,
    pub description: String,
    pub approval: String,
}

/// Result of pressing the join button on a clan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    AlreadyMember,
    /// The clan requires approval; the owner decides.
    RequestSent { owner_id: u64 },
    /// Membership stored; the member role, if any, should be granted.
    Joined { member_role_id: Option<u64> },
}

pub struct ClanService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClanService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Refuses members who already own a clan, before the creation modal is shown.
    pub async fn ensure_can_request(&self, owner_id: u64) -> Result<(), AppError> {
        match ClanRepository::new(self.db).find_by_owner(owner_id).await? {
            Some(clan) => Err(ClanError::AlreadyOwner {
                name: clan.name,
                tag: clan.tag,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Validates and stores a new clan request.
    ///
    /// # Returns
    /// - `Ok(Clan)` - The stored, not yet accepted clan
    /// - `Err(AppError::ClanErr)` - Invalid input, taken tag or name, or the member already owns a clan
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn request(
        &self,
        input: ClanRequestInput,
        owner_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Clan, AppError> {
        let param = validate_request(input, owner_id)?;
        let repo = ClanRepository::new(self.db);

        self.ensure_can_request(owner_id).await?;

        if repo.find_by_tag(&param.tag).await?.is_some() {
            return Err(ClanError::TagTaken(param.tag).into());
        }
        if repo.tag_or_name_taken(&param.tag, &param.name).await? {
            return Err(ClanError::NameTaken(param.name).into());
        }

        Ok(repo.create(param, now).await?)
    }

    /// Gets a clan that is waiting for review.
    pub async fn pending(&self, tag: &str) -> Result<Clan, AppError> {
        let clan = ClanRepository::new(self.db)
            .find_by_tag(tag)
            .await?
            .ok_or_else(|| ClanError::NotFound(tag.to_string()))?;

        if clan.accepted {
            return Err(ClanError::AlreadyAccepted(clan.tag).into());
        }

        Ok(clan)
    }

    /// Marks a reviewed clan accepted once its resources exist and records the owner
    /// as the first member.
    pub async fn accept(&self, tag: &str, resources: &ClanResources) -> Result<Clan, AppError> {
        let clan = ClanRepository::new(self.db)
            .mark_accepted(tag, resources)
            .await?
            .ok_or_else(|| ClanError::NotFound(tag.to_string()))?;

        let members = ClanMemberRepository::new(self.db);
        if !members.is_member(tag, clan.owner_id).await? {
            members.add(tag, clan.owner_id).await?;
        }

        Ok(clan)
    }

    /// Deletes a clan request, used both for rejection and for a failed acceptance.
    ///
    /// # Returns
    /// - `Ok(Some(Clan))` - The deleted clan
    /// - `Ok(None)` - No clan with that tag exists
    pub async fn discard(&self, tag: &str) -> Result<Option<Clan>, AppError> {
        let repo = ClanRepository::new(self.db);
        let Some(clan) = repo.find_by_tag(tag).await? else {
            return Ok(None);
        };

        repo.delete(tag).await?;

        Ok(Some(clan))
    }

    /// Gets the accepted clan shown on page `index` of the join browser.
    pub async fn browse(&self, index: u64) -> Result<(Option<Clan>, u64), AppError> {
        Ok(ClanRepository::new(self.db).get_accepted_page(index).await?)
    }

    pub async fn join(&self, tag: &str, user_id: u64) -> Result<JoinOutcome, AppError> {
        let clan = ClanRepository::new(self.db)
            .find_by_tag(tag)
            .await?
            .filter(|clan| clan.accepted)
            .ok_or_else(|| ClanError::NotFound(tag.to_string()))?;

        let members = ClanMemberRepository::new(self.db);
        if members.is_member(tag, user_id).await? {
            return Ok(JoinOutcome::AlreadyMember);
        }

        if clan.approval_required {
            return Ok(JoinOutcome::RequestSent {
                owner_id: clan.owner_id,
            });
        }

        members.add(tag, user_id).await?;

        Ok(JoinOutcome::Joined {
            member_role_id: clan.member_role_id,
        })
    }

    /// Gets the member's clan if it may be edited now.
    ///
    /// # Returns
    /// - `Ok(Clan)` - The owned clan, past its edit cooldown
    /// - `Err(AppError::ClanErr(NotOwner))` - The member owns no clan
    /// - `Err(AppError::ClanErr(EditCooldown))` - Last edit was less than 2 days ago
    pub async fn editable_clan(&self, owner_id: u64, now: DateTime<Utc>) -> Result<Clan, AppError> {
        let clan = ClanRepository::new(self.db)
            .find_by_owner(owner_id)
            .await?
            .ok_or(ClanError::NotOwner)?;

        if let Some(remaining) = edit_cooldown_remaining(clan.last_edit, now) {
            return Err(ClanError::EditCooldown(format_remaining(remaining)).into());
        }

        Ok(clan)
    }

    /// Validates and applies an edit submitted from the edit modal.
    pub async fn edit(
        &self,
        owner_id: u64,
        field: ClanField,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<Clan, AppError> {
        let clan = self.editable_clan(owner_id, now).await?;
        let edit = parse_edit(field, input)?;
        let repo = ClanRepository::new(self.db);

        if let ClanEdit::Name(name) = &edit {
            if repo.name_taken_by_other(&clan.tag, name).await? {
                return Err(ClanError::NameTaken(name.clone()).into());
            }
        }

        repo.apply_edit(&clan.tag, edit, now)
            .await?
            .ok_or_else(|| ClanError::NotFound(clan.tag).into())
    }
}

/// Validates the raw creation modal values.
pub fn validate_request(input: ClanRequestInput, owner_id: u64) -> Result<CreateClanParam, ClanError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(ClanError::EmptyField("name"));
    }
    let description = input.description.trim().to_string();
    if description.is_empty() {
        return Err(ClanError::EmptyField("description"));
    }

    Ok(CreateClanParam {
        tag: normalize_tag(&input.tag)?,
        name,
        color: validate_color(&input.color)?,
        description,
        approval_required: parse_approval(&input.approval)?,
        owner_id,
    })
}

/// Uppercases a clan tag and checks it is 1 to 5 word characters.
pub fn normalize_tag(input: &str) -> Result<String, ClanError> {
    let tag = input.trim().to_uppercase();
    let valid = !tag.is_empty()
        && tag.chars().count() <= MAX_TAG_LENGTH
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(tag)
    } else {
        Err(ClanError::InvalidTag)
    }
}

pub fn validate_color(input: &str) -> Result<String, ClanError> {
    let color = input.trim();
    if HEX_COLOR.is_match(color) {
        Ok(color.to_string())
    } else {
        Err(ClanError::InvalidColor)
    }
}

/// Parses the approval answer; German answers are still accepted.
pub fn parse_approval(input: &str) -> Result<bool, ClanError> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "ja" => Ok(true),
        "no" | "nein" => Ok(false),
        _ => Err(ClanError::InvalidApproval),
    }
}

pub fn parse_edit(field: ClanField, input: &str) -> Result<ClanEdit, ClanError> {
    let value = input.trim();

    Ok(match field {
        ClanField::Name if value.is_empty() => return Err(ClanError::EmptyField("name")),
        ClanField::Name => ClanEdit::Name(value.to_string()),
        ClanField::Color => ClanEdit::Color(validate_color(value)?),
        ClanField::Description if value.is_empty() => {
            return Err(ClanError::EmptyField("description"))
        }
        ClanField::Description => ClanEdit::Description(value.to_string()),
        ClanField::Approval => ClanEdit::Approval(parse_approval(value)?),
    })
}

/// Converts a `#RRGGBB` color into its numeric value.
pub fn color_value(color: &str) -> Option<u32> {
    u32::from_str_radix(color.strip_prefix('#')?, 16).ok()
}

/// Recovers the clan tag from a request embed title ending in `[TAG]`.
pub fn tag_from_title(title: &str) -> Option<String> {
    TITLE_TAG
        .captures(title.trim_end())
        .and_then(|captures| captures.get(1))
        .map(|tag| tag.as_str().to_string())
}

/// Time left until the clan may be edited again, if any.
pub fn edit_cooldown_remaining(last_edit: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
    let ready_at = last_edit + Duration::days(EDIT_COOLDOWN_DAYS);

    (now < ready_at).then(|| ready_at - now)
}

/// Formats a duration as `Hh Mm Ss`, with hours not wrapped into days.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);

    format!(
        "{}h {}m {}s",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn request_title(clan: &Clan) -> String {
    format!("🚨 New clan request: {} [{}]", clan.name, clan.tag)
}

pub fn admin_role_name(tag: &str) -> String {
    format!("{}-Admin", tag)
}

pub fn member_role_name(tag: &str) -> String {
    format!("{}-Member", tag)
}

pub fn category_name(tag: &str) -> String {
    format!("Clan - {}", tag)
}

pub fn chat_channel_name(tag: &str) -> String {
    format!("{}-chat", tag.to_lowercase())
}

pub fn admin_news_channel_name(tag: &str) -> String {
    format!("{}-admin-news", tag.to_lowercase())
}

pub fn stage_channel_name(tag: &str) -> String {
    format!("{}-stage", tag.to_lowercase())
}

pub fn voice_channel_name(tag: &str, number: u8) -> String {
    format!("{} Voicechat {}", tag, number)
}

/// Permission overwrites for each channel of an accepted clan.
#[derive(Debug, Clone)]
pub struct ClanOverwrites {
    /// Category and voice channels: private to the two clan roles.
    pub base: Vec<PermissionOverwrite>,
    /// Chat channel: admins may also manage messages and the channel.
    pub chat: Vec<PermissionOverwrite>,
    /// Admin news channel: hidden from plain members.
    pub admin_news: Vec<PermissionOverwrite>,
    /// Stage channel: admins speak, members request to speak.
    pub stage: Vec<PermissionOverwrite>,
}

fn role_overwrite(role_id: u64, allow: Permissions, deny: Permissions) -> PermissionOverwrite {
    PermissionOverwrite {
        allow,
        deny,
        kind: PermissionOverwriteType::Role(RoleId::new(role_id)),
    }
}

/// Builds the overwrites of a clan structure; `@everyone` shares its ID with the guild.
pub fn clan_overwrites(guild_id: u64, admin_role_id: u64, member_role_id: u64) -> ClanOverwrites {
    let hidden = Permissions::VIEW_CHANNEL | Permissions::CONNECT;
    let access = Permissions::VIEW_CHANNEL | Permissions::CONNECT | Permissions::SEND_MESSAGES;
    let everyone = role_overwrite(guild_id, Permissions::empty(), hidden);
    let member = role_overwrite(member_role_id, access, Permissions::empty());

    ClanOverwrites {
        base: vec![
            everyone.clone(),
            role_overwrite(admin_role_id, access, Permissions::empty()),
            member.clone(),
        ],
        chat: vec![
            everyone.clone(),
            role_overwrite(
                admin_role_id,
                access | Permissions::MANAGE_MESSAGES | Permissions::MANAGE_CHANNELS,
                Permissions::empty(),
            ),
            member.clone(),
        ],
        admin_news: vec![
            everyone.clone(),
            role_overwrite(
                admin_role_id,
                Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::MANAGE_MESSAGES
                    | Permissions::MENTION_EVERYONE
                    | Permissions::MANAGE_CHANNELS,
                Permissions::empty(),
            ),
            role_overwrite(
                member_role_id,
                Permissions::empty(),
                Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            ),
        ],
        stage: vec![
            everyone,
            role_overwrite(
                admin_role_id,
                access
                    | Permissions::SPEAK
                    | Permissions::MANAGE_CHANNELS
                    | Permissions::MOVE_MEMBERS
                    | Permissions::MANAGE_ROLES,
                Permissions::REQUEST_TO_SPEAK,
            ),
            role_overwrite(
                member_role_id,
                access | Permissions::REQUEST_TO_SPEAK,
                Permissions::SPEAK,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn input() -> ClanRequestInput {
        ClanRequestInput {
            name: "The Miners".to_string(),
            tag: "mc_r".to_string(),
            color: "#1A2b3C".to_string(),
            description: "We dig deep and build high.".to_string(),
            approval: "Yes".to_string(),
        }
    }

    #[test]
    fn validates_request_fields() {
        let param = validate_request(input(), 7).unwrap();

        assert_eq!(param.tag, "MC_R");
        assert_eq!(param.color, "#1A2b3C");
        assert!(param.approval_required);
    }

    #[test]
    fn rejects_bad_color() {
        for color in ["123456", "#12345", "#GGGGGG", "#1234567"] {
            let result = validate_request(
                ClanRequestInput {
                    color: color.to_string(),
                    ..input()
                },
                7,
            );
            assert_eq!(result, Err(ClanError::InvalidColor), "{}", color);
        }
    }

    #[test]
    fn parses_approval_in_both_languages() {
        assert_eq!(parse_approval("NEIN"), Ok(false));
        assert_eq!(parse_approval("ja"), Ok(true));
        assert_eq!(parse_approval("no"), Ok(false));
        assert_eq!(parse_approval("maybe"), Err(ClanError::InvalidApproval));
    }

    #[test]
    fn rejects_long_or_symbolic_tags() {
        assert_eq!(normalize_tag("toolong"), Err(ClanError::InvalidTag));
        assert_eq!(normalize_tag("a-b"), Err(ClanError::InvalidTag));
        assert_eq!(normalize_tag(""), Err(ClanError::InvalidTag));
    }

    #[test]
    fn recovers_tag_from_title() {
        assert_eq!(
            tag_from_title("🚨 New clan request: The Miners [MC_R]"),
            Some("MC_R".to_string())
        );
        assert_eq!(tag_from_title("No tag here"), None);
        assert_eq!(tag_from_title("Too long [ABCDEF]"), None);
    }

    #[test]
    fn cooldown_lasts_two_days() {
        let last_edit = Utc::now();

        let remaining =
            edit_cooldown_remaining(last_edit, last_edit + Duration::hours(1)).unwrap();
        assert_eq!(format_remaining(remaining), "47h 0m 0s");
        assert!(edit_cooldown_remaining(last_edit, last_edit + Duration::days(2)).is_none());
    }

    #[test]
    fn formats_mixed_durations() {
        let remaining = Duration::seconds(3600 + 120 + 5);

        assert_eq!(format_remaining(remaining), "1h 2m 5s");
    }

    #[test]
    fn converts_colors() {
        assert_eq!(color_value("#FF0000"), Some(0xFF0000));
        assert_eq!(color_value("FF0000"), None);
    }

    #[test]
    fn names_clan_resources() {
        assert_eq!(admin_role_name("MC"), "MC-Admin");
        assert_eq!(member_role_name("MC"), "MC-Member");
        assert_eq!(category_name("MC"), "Clan - MC");
        assert_eq!(chat_channel_name("MC"), "mc-chat");
        assert_eq!(admin_news_channel_name("MC"), "mc-admin-news");
        assert_eq!(stage_channel_name("MC"), "mc-stage");
        assert_eq!(voice_channel_name("MC", 2), "MC Voicechat 2");
    }

    #[test]
    fn admin_news_is_hidden_from_members() {
        let overwrites = clan_overwrites(1, 2, 3);

        let member_news = overwrites
            .admin_news
            .iter()
            .find(|o| o.kind == PermissionOverwriteType::Role(RoleId::new(3)))
            .unwrap();
        assert!(member_news.deny.contains(Permissions::VIEW_CHANNEL));

        let member_stage = overwrites
            .stage
            .iter()
            .find(|o| o.kind == PermissionOverwriteType::Role(RoleId::new(3)))
            .unwrap();
        assert!(member_stage.allow.contains(Permissions::REQUEST_TO_SPEAK));
        assert!(member_stage.deny.contains(Permissions::SPEAK));

        assert!(overwrites.base[0].deny.contains(Permissions::VIEW_CHANNEL));
    }

    #[test]
    fn edit_parses_field_values() {
        assert_eq!(
            parse_edit(ClanField::Approval, "nein"),
            Ok(ClanEdit::Approval(false))
        );
        assert_eq!(
            parse_edit(ClanField::Color, "red"),
            Err(ClanError::InvalidColor)
        );
        assert_eq!(
            parse_edit(ClanField::Name, "  "),
            Err(ClanError::EmptyField("name"))
        );
    }

    #[tokio::test]
    async fn request_stores_pending_clan() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);

        let clan = service.request(input(), 7, Utc::now()).await?;

        assert_eq!(clan.tag, "MC_R");
        assert!(!clan.accepted);
        assert_eq!(service.pending("MC_R").await?.tag, "MC_R");

        Ok(())
    }

    #[tokio::test]
    async fn request_refuses_second_clan_of_owner() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);

        service.request(input(), 7, Utc::now()).await?;
        let second = ClanRequestInput {
            name: "Other".to_string(),
            tag: "OTH".to_string(),
            ..input()
        };
        let result = service.request(second, 7, Utc::now()).await;

        assert!(matches!(
            result,
            Err(AppError::ClanErr(ClanError::AlreadyOwner { .. }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn request_refuses_taken_tag_and_name() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);

        service.request(input(), 7, Utc::now()).await?;

        let same_tag = service.request(input(), 8, Utc::now()).await;
        assert!(matches!(
            same_tag,
            Err(AppError::ClanErr(ClanError::TagTaken(_)))
        ));

        let same_name = ClanRequestInput {
            tag: "NEW".to_string(),
            ..input()
        };
        let result = service.request(same_name, 9, Utc::now()).await;
        assert!(matches!(
            result,
            Err(AppError::ClanErr(ClanError::NameTaken(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn accept_records_owner_membership() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);
        service.request(input(), 7, Utc::now()).await?;

        let resources = ClanResources {
            category_id: 1,
            admin_role_id: 2,
            member_role_id: 3,
            general_text_id: 4,
            admin_text_id: 5,
            voice_channel_ids: vec![6, 7],
        };
        let clan = service.accept("MC_R", &resources).await?;

        assert!(clan.accepted);
        assert_eq!(clan.voice_channel_ids, vec![6, 7]);
        assert!(ClanMemberRepository::new(db).is_member("MC_R", 7).await?);
        assert!(matches!(
            service.pending("MC_R").await,
            Err(AppError::ClanErr(ClanError::AlreadyAccepted(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn discard_removes_request() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);
        service.request(input(), 7, Utc::now()).await?;

        assert!(service.discard("MC_R").await?.is_some());
        assert!(service.discard("MC_R").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn join_respects_approval_and_membership() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);

        let open = factory::clan::ClanFactory::new(db)
            .tag("OPEN")
            .name("Open Clan")
            .accepted(true)
            .roles("11", "12")
            .build()
            .await?;
        let closed = factory::clan::ClanFactory::new(db)
            .tag("SHUT")
            .name("Closed Clan")
            .owner_id("99")
            .approval_required(true)
            .accepted(true)
            .build()
            .await?;

        assert_eq!(
            service.join(&open.tag, 5).await?,
            JoinOutcome::Joined {
                member_role_id: Some(12)
            }
        );
        assert_eq!(service.join(&open.tag, 5).await?, JoinOutcome::AlreadyMember);
        assert_eq!(
            service.join(&closed.tag, 5).await?,
            JoinOutcome::RequestSent { owner_id: 99 }
        );

        Ok(())
    }

    #[tokio::test]
    async fn edit_is_blocked_during_cooldown() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ClanService::new(db);
        let now = Utc::now();
        service.request(input(), 7, now).await?;

        let result = service
            .edit(7, ClanField::Description, "New text", now + Duration::hours(1))
            .await;
        assert!(matches!(
            result,
            Err(AppError::ClanErr(ClanError::EditCooldown(_)))
        ));

        let later = now + Duration::days(3);
        let clan = service
            .edit(7, ClanField::Description, "A brand new description text", later)
            .await?;
        assert_eq!(clan.short_desc, "A brand new descript");
        assert!(service.editable_clan(7, later).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn edit_requires_ownership() -> Result<(), AppError> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = ClanService::new(db)
            .edit(7, ClanField::Name, "Anything", Utc::now())
            .await;

        assert!(matches!(result, Err(AppError::ClanErr(ClanError::NotOwner))));

        Ok(())
    }
}
