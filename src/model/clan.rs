//! Clan domain models.
//!
//! A clan is requested through a modal, reviewed by the team and, once accepted,
//! receives its own roles, category and channels.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Stored clan, pending or accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clan {
    pub tag: String,
    pub name: String,
    pub color: String,
    pub short_desc: String,
    pub full_desc: String,
    pub approval_required: bool,
    pub owner_id: u64,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
    pub last_edit: DateTime<Utc>,
    pub category_id: Option<u64>,
    pub admin_role_id: Option<u64>,
    pub member_role_id: Option<u64>,
    pub general_text_id: Option<u64>,
    pub admin_text_id: Option<u64>,
    pub voice_channel_ids: Vec<u64>,
}

impl Clan {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// `voice_channel_ids` is stored as a JSON array of ID strings.
    ///
    /// # Returns
    /// - `Ok(Clan)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored ID or the JSON column could not be parsed
    pub fn from_entity(entity: entity::clan::Model) -> Result<Self, DbErr> {
        let voice_channel_ids = match entity.voice_channel_ids {
            serde_json::Value::Array(values) => values
                .iter()
                .map(|value| match value {
                    serde_json::Value::String(id) => parse_id(id, "voice_channel_ids"),
                    other => Err(DbErr::Custom(format!(
                        "Unexpected voice channel id value: {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            serde_json::Value::Null => Vec::new(),
            other => {
                return Err(DbErr::Custom(format!(
                    "voice_channel_ids is not an array: {}",
                    other
                )))
            }
        };

        Ok(Self {
            owner_id: parse_id(&entity.owner_id, "owner_id")?,
            category_id: parse_optional_id(entity.category_id, "category_id")?,
            admin_role_id: parse_optional_id(entity.admin_role_id, "admin_role_id")?,
            member_role_id: parse_optional_id(entity.member_role_id, "member_role_id")?,
            general_text_id: parse_optional_id(entity.general_text_id, "general_text_id")?,
            admin_text_id: parse_optional_id(entity.admin_text_id, "admin_text_id")?,
            tag: entity.tag,
            name: entity.name,
            color: entity.color,
            short_desc: entity.short_desc,
            full_desc: entity.full_desc,
            approval_required: entity.approval_required,
            accepted: entity.accepted,
            created_at: entity.created_at,
            last_edit: entity.last_edit,
            voice_channel_ids,
        })
    }
}

fn parse_id(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

fn parse_optional_id(value: Option<String>, column: &str) -> Result<Option<u64>, DbErr> {
    value.map(|id| parse_id(&id, column)).transpose()
}

/// Validated values for a new clan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClanParam {
    pub tag: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub approval_required: bool,
    pub owner_id: u64,
}

/// Discord resources created when a clan is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClanResources {
    pub category_id: u64,
    pub admin_role_id: u64,
    pub member_role_id: u64,
    pub general_text_id: u64,
    pub admin_text_id: u64,
    pub voice_channel_ids: Vec<u64>,
}

/// Field a clan owner can edit after acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClanField {
    Name,
    Color,
    Description,
    Approval,
}

impl ClanField {
    pub const ALL: [ClanField; 4] = [
        ClanField::Name,
        ClanField::Color,
        ClanField::Description,
        ClanField::Approval,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Color => "color",
            Self::Description => "description",
            Self::Approval => "approval",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Color => "Color",
            Self::Description => "Description",
            Self::Approval => "Approval required",
        }
    }

    /// Current value of this field, used to prefill the edit modal.
    pub fn current_value(&self, clan: &Clan) -> String {
        match self {
            Self::Name => clan.name.clone(),
            Self::Color => clan.color.clone(),
            Self::Description => clan.full_desc.clone(),
            Self::Approval => (if clan.approval_required { "yes" } else { "no" }).to_string(),
        }
    }
}

/// A validated change to a single clan field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClanEdit {
    Name(String),
    Color(String),
    Description(String),
    Approval(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixture;

    #[test]
    fn converts_stored_ids() {
        let mut entity = fixture::clan_entity_builder().tag("ABC").build();
        entity.voice_channel_ids = serde_json::json!(["7001", "7002"]);

        let clan = Clan::from_entity(entity).unwrap();

        assert_eq!(clan.tag, "ABC");
        assert_eq!(clan.owner_id, 123456789);
        assert_eq!(clan.member_role_id, Some(5002));
        assert_eq!(clan.category_id, None);
        assert_eq!(clan.voice_channel_ids, vec![7001, 7002]);
    }

    #[test]
    fn rejects_malformed_voice_channel_ids() {
        let mut entity = fixture::clan_entity();
        entity.voice_channel_ids = serde_json::json!({"id": 1});

        assert!(Clan::from_entity(entity).is_err());

        let mut entity = fixture::clan_entity();
        entity.voice_channel_ids = serde_json::json!([7001]);

        assert!(Clan::from_entity(entity).is_err());
    }

    #[test]
    fn edit_fields_round_trip_through_keys() {
        for field in ClanField::ALL {
            assert_eq!(ClanField::from_key(field.key()), Some(field));
        }
        assert_eq!(ClanField::from_key("tag"), None);

        let clan = Clan::from_entity(fixture::clan_entity()).unwrap();
        assert_eq!(ClanField::Approval.current_value(&clan), "no");
    }
}
