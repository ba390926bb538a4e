//! Clan factory for creating test clan entities.
//!
//! Clans default to a pending (not accepted) state without any Discord resources,
//! matching a freshly submitted application.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test clans with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let clan = ClanFactory::new(&db)
///     .tag("WOLF")
///     .name("Wolfpack")
///     .accepted(true)
///     .build()
///     .await?;
/// ```
pub struct ClanFactory<'a> {
    db: &'a DatabaseConnection,
    tag: String,
    name: String,
    color: String,
    full_desc: String,
    approval_required: bool,
    owner_id: String,
    accepted: bool,
    last_edit: DateTime<Utc>,
    member_role_id: Option<String>,
    admin_role_id: Option<String>,
}

impl<'a> ClanFactory<'a> {
    /// Creates a new ClanFactory with default values.
    ///
    /// Defaults:
    /// - tag: `"T{n}"` where n is the last three digits of a unique id
    /// - name: `"Clan {id}"`
    /// - color: `"#336699"`
    /// - approval_required: `false`
    /// - accepted: `false`
    /// - last_edit: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            tag: format!("T{:03}", id % 1000),
            name: format!("Clan {}", id),
            color: "#336699".to_string(),
            full_desc: "A friendly test clan that plays together every evening.".to_string(),
            approval_required: false,
            owner_id: next_id().to_string(),
            accepted: false,
            last_edit: Utc::now(),
            member_role_id: None,
            admin_role_id: None,
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn full_desc(mut self, full_desc: impl Into<String>) -> Self {
        self.full_desc = full_desc.into();
        self
    }

    pub fn approval_required(mut self, approval_required: bool) -> Self {
        self.approval_required = approval_required;
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

    pub fn last_edit(mut self, last_edit: DateTime<Utc>) -> Self {
        self.last_edit = last_edit;
        self
    }

    pub fn roles(mut self, admin_role_id: &str, member_role_id: &str) -> Self {
        self.admin_role_id = Some(admin_role_id.to_string());
        self.member_role_id = Some(member_role_id.to_string());
        self
    }

    /// Builds and inserts the clan into the database.
    pub async fn build(self) -> Result<entity::clan::Model, DbErr> {
        let short_desc: String = self.full_desc.chars().take(20).collect();

        entity::clan::ActiveModel {
            tag: ActiveValue::Set(self.tag),
            name: ActiveValue::Set(self.name),
            color: ActiveValue::Set(self.color),
            short_desc: ActiveValue::Set(short_desc),
            full_desc: ActiveValue::Set(self.full_desc),
            approval_required: ActiveValue::Set(self.approval_required),
            owner_id: ActiveValue::Set(self.owner_id),
            accepted: ActiveValue::Set(self.accepted),
            created_at: ActiveValue::Set(Utc::now()),
            last_edit: ActiveValue::Set(self.last_edit),
            category_id: ActiveValue::Set(None),
            admin_role_id: ActiveValue::Set(self.admin_role_id),
            member_role_id: ActiveValue::Set(self.member_role_id),
            general_text_id: ActiveValue::Set(None),
            admin_text_id: ActiveValue::Set(None),
            voice_channel_ids: ActiveValue::Set(serde_json::json!([])),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending clan with default values.
pub async fn create_clan(db: &DatabaseConnection) -> Result<entity::clan::Model, DbErr> {
    ClanFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_pending_clan_with_truncated_short_desc() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let clan = create_clan(db).await?;

        assert!(!clan.accepted);
        assert_eq!(clan.short_desc.chars().count(), 20);
        assert!(clan.tag.len() <= 5);

        Ok(())
    }
}
