//! Clan fixtures for creating in-memory test data.

use chrono::{DateTime, Utc};
use entity::clan;

/// Default test clan tag.
pub const DEFAULT_TAG: &str = "TEST";

/// Default test clan name.
pub const DEFAULT_NAME: &str = "Test Clan";

/// Default test owner ID.
pub const DEFAULT_OWNER_ID: &str = "123456789";

/// Creates an accepted clan model with default values.
///
/// # Default Values
/// - tag: `"TEST"`
/// - name: `"Test Clan"`
/// - owner_id: `"123456789"`
/// - accepted: `true`
/// - last_edit: now
pub fn entity() -> clan::Model {
    entity_builder().build()
}

/// Creates a clan builder for customizing fields.
pub fn entity_builder() -> ClanEntityBuilder {
    ClanEntityBuilder {
        tag: DEFAULT_TAG.to_string(),
        name: DEFAULT_NAME.to_string(),
        owner_id: DEFAULT_OWNER_ID.to_string(),
        accepted: true,
        approval_required: false,
        last_edit: Utc::now(),
    }
}

/// Builder for in-memory clan models.
pub struct ClanEntityBuilder {
    tag: String,
    name: String,
    owner_id: String,
    accepted: bool,
    approval_required: bool,
    last_edit: DateTime<Utc>,
}

impl ClanEntityBuilder {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn accepted(mut self, accepted: bool) -> Self {
        self.accepted = accepted;
        self
    }

    pub fn approval_required(mut self, approval_required: bool) -> Self {
        self.approval_required = approval_required;
        self
    }

    pub fn last_edit(mut self, last_edit: DateTime<Utc>) -> Self {
        self.last_edit = last_edit;
        self
    }

    pub fn build(self) -> clan::Model {
        clan::Model {
            tag: self.tag,
            name: self.name,
            color: "#336699".to_string(),
            short_desc: "We play together".to_string(),
            full_desc: "We play together every evening.".to_string(),
            approval_required: self.approval_required,
            owner_id: self.owner_id,
            accepted: self.accepted,
            created_at: self.last_edit,
            last_edit: self.last_edit,
            category_id: None,
            admin_role_id: Some("5001".to_string()),
            member_role_id: Some("5002".to_string()),
            general_text_id: None,
            admin_text_id: None,
            voice_channel_ids: serde_json::json!([]),
        }
    }
}
