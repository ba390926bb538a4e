//! Clan and clan membership repositories.
//!
//! Clans are keyed by their tag. Discord resource IDs are filled in once a clan is
//! accepted; until then the clan is only a pending request.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::clan::{Clan, ClanEdit, ClanResources, CreateClanParam};
use crate::util::text::truncate_chars;

/// Length of the short description shown in the clan browser.
pub const SHORT_DESC_LENGTH: usize = 20;

/// Repository for clan database operations.
pub struct ClanRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> ClanRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new, not yet accepted clan request.
    ///
    /// The short description is derived from the first characters of the description.
    ///
    /// # Arguments
    /// - `param` - Validated clan values
    /// - `now` - Creation timestamp, also used as the initial `last_edit`
    ///
    /// # Returns
    /// - `Ok(Clan)` - The stored clan
    /// - `Err(DbErr)` - Database error, including a duplicate tag or name
    pub async fn create(&self, param: CreateClanParam, now: DateTime<Utc>) -> Result<Clan, DbErr> {
        let entity = entity::clan::ActiveModel {
            tag: ActiveValue::Set(param.tag),
            name: ActiveValue::Set(param.name),
            color: ActiveValue::Set(param.color),
            short_desc: ActiveValue::Set(truncate_chars(&param.description, SHORT_DESC_LENGTH)),
            full_desc: ActiveValue::Set(param.description),
            approval_required: ActiveValue::Set(param.approval_required),
            owner_id: ActiveValue::Set(param.owner_id.to_string()),
            accepted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            last_edit: ActiveValue::Set(now),
            category_id: ActiveValue::Set(None),
            admin_role_id: ActiveValue::Set(None),
            member_role_id: ActiveValue::Set(None),
            general_text_id: ActiveValue::Set(None),
            admin_text_id: ActiveValue::Set(None),
            voice_channel_ids: ActiveValue::Set(serde_json::json!([])),
        }
        .insert(self.db)
        .await?;

        Clan::from_entity(entity)
    }

    pub async fn find_by_tag(&self, tag: &str) -> Result<Option<Clan>, DbErr> {
        entity::prelude::Clan::find_by_id(tag.to_string())
            .one(self.db)
            .await?
            .map(Clan::from_entity)
            .transpose()
    }

    /// Finds the clan owned by a user, accepted or pending.
    pub async fn find_by_owner(&self, owner_id: u64) -> Result<Option<Clan>, DbErr> {
        entity::prelude::Clan::find()
            .filter(entity::clan::Column::OwnerId.eq(owner_id.to_string()))
            .one(self.db)
            .await?
            .map(Clan::from_entity)
            .transpose()
    }

    /// Checks whether a clan with the given tag or name already exists.
    pub async fn tag_or_name_taken(&self, tag: &str, name: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Clan::find()
            .filter(
                Condition::any()
                    .add(entity::clan::Column::Tag.eq(tag))
                    .add(entity::clan::Column::Name.eq(name)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether another clan already uses `name`.
    pub async fn name_taken_by_other(&self, tag: &str, name: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Clan::find()
            .filter(entity::clan::Column::Name.eq(name))
            .filter(entity::clan::Column::Tag.ne(tag))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets one accepted clan by page index, ordered by tag.
    ///
    /// # Returns
    /// - `Ok((Some(Clan), total))` - The clan at `index` and the number of accepted clans
    /// - `Ok((None, total))` - `index` is past the end
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_accepted_page(&self, index: u64) -> Result<(Option<Clan>, u64), DbErr> {
        let query = entity::prelude::Clan::find()
            .filter(entity::clan::Column::Accepted.eq(true))
            .order_by_asc(entity::clan::Column::Tag);

        let total = query.clone().count(self.db).await?;
        let clan = query
            .offset(index)
            .limit(1)
            .one(self.db)
            .await?
            .map(Clan::from_entity)
            .transpose()?;

        Ok((clan, total))
    }

    /// Marks a clan as accepted and stores the IDs of its Discord resources.
    ///
    /// # Returns
    /// - `Ok(Some(Clan))` - The updated clan
    /// - `Ok(None)` - No clan exists with that tag
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_accepted(
        &self,
        tag: &str,
        resources: &ClanResources,
    ) -> Result<Option<Clan>, DbErr> {
        let Some(existing) = entity::prelude::Clan::find_by_id(tag.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let voice_ids: Vec<String> = resources
            .voice_channel_ids
            .iter()
            .map(|id| id.to_string())
            .collect();

        let mut active: entity::clan::ActiveModel = existing.into();
        active.accepted = ActiveValue::Set(true);
        active.category_id = ActiveValue::Set(Some(resources.category_id.to_string()));
        active.admin_role_id = ActiveValue::Set(Some(resources.admin_role_id.to_string()));
        active.member_role_id = ActiveValue::Set(Some(resources.member_role_id.to_string()));
        active.general_text_id = ActiveValue::Set(Some(resources.general_text_id.to_string()));
        active.admin_text_id = ActiveValue::Set(Some(resources.admin_text_id.to_string()));
        active.voice_channel_ids = ActiveValue::Set(serde_json::json!(voice_ids));

        let updated = active.update(self.db).await?;

        Clan::from_entity(updated).map(Some)
    }

    /// Applies a single field edit and refreshes `last_edit`.
    ///
    /// Description edits also refresh the short description.
    pub async fn apply_edit(
        &self,
        tag: &str,
        edit: ClanEdit,
        now: DateTime<Utc>,
    ) -> Result<Option<Clan>, DbErr> {
        let Some(existing) = entity::prelude::Clan::find_by_id(tag.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::clan::ActiveModel = existing.into();
        match edit {
            ClanEdit::Name(name) => active.name = ActiveValue::Set(name),
            ClanEdit::Color(color) => active.color = ActiveValue::Set(color),
            ClanEdit::Description(description) => {
                active.short_desc =
                    ActiveValue::Set(truncate_chars(&description, SHORT_DESC_LENGTH));
                active.full_desc = ActiveValue::Set(description);
            }
            ClanEdit::Approval(required) => active.approval_required = ActiveValue::Set(required),
        }
        active.last_edit = ActiveValue::Set(now);

        let updated = active.update(self.db).await?;

        Clan::from_entity(updated).map(Some)
    }

    /// Deletes a clan; memberships are removed by the cascading foreign key.
    pub async fn delete(&self, tag: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Clan::delete_by_id(tag.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Repository for clan memberships.
pub struct ClanMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClanMemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a member to a clan.
    pub async fn add(&self, tag: &str, user_id: u64) -> Result<(), DbErr> {
        entity::clan_member::ActiveModel {
            tag: ActiveValue::Set(tag.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn is_member(&self, tag: &str, user_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::ClanMember::find()
            .filter(entity::clan_member::Column::Tag.eq(tag))
            .filter(entity::clan_member::Column::UserId.eq(user_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the user IDs of every member of a clan.
    pub async fn get_members(&self, tag: &str) -> Result<Vec<u64>, DbErr> {
        entity::prelude::ClanMember::find()
            .filter(entity::clan_member::Column::Tag.eq(tag))
            .all(self.db)
            .await?
            .into_iter()
            .map(|member| {
                member
                    .user_id
                    .parse::<u64>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))
            })
            .collect()
    }
}
