//! Serenity-backed role directory for the category reconciler.

use std::collections::HashMap;

use serenity::all::{Context, EditMember, GuildId, RoleId, UserId};
use serenity::async_trait;

use crate::{error::role_sync::RoleSyncError, service::role_category::RoleDirectory};

/// Reads roles from the gateway cache, falling back to the HTTP API when the guild
/// or the bot member is not cached.
pub struct SerenityRoleDirectory<'a> {
    ctx: &'a Context,
}

impl<'a> SerenityRoleDirectory<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl RoleDirectory for SerenityRoleDirectory<'_> {
    async fn role_positions(&self, guild_id: u64) -> Result<HashMap<u64, u16>, RoleSyncError> {
        let guild_id = GuildId::new(guild_id);

        let cached = self.ctx.cache.guild(guild_id).map(|guild| {
            guild
                .roles
                .iter()
                .map(|(id, role)| (id.get(), role.position))
                .collect::<HashMap<u64, u16>>()
        });
        if let Some(positions) = cached {
            return Ok(positions);
        }

        tracing::debug!("Guild {} not cached, fetching roles over HTTP", guild_id);

        let roles = guild_id.roles(&self.ctx.http).await?;

        Ok(roles
            .iter()
            .map(|(id, role)| (id.get(), role.position))
            .collect())
    }

    async fn bot_top_position(&self, guild_id: u64) -> Result<u16, RoleSyncError> {
        let bot_id = self.ctx.cache.current_user().id;
        let guild = GuildId::new(guild_id);

        let cached_roles = self
            .ctx
            .cache
            .guild(guild)
            .and_then(|guild| guild.members.get(&bot_id).map(|member| member.roles.clone()));

        let bot_roles: Vec<RoleId> = match cached_roles {
            Some(roles) => roles,
            None => guild.member(&self.ctx.http, bot_id).await?.roles,
        };

        let positions = self.role_positions(guild_id).await?;

        Ok(bot_roles
            .iter()
            .filter_map(|id| positions.get(&id.get()).copied())
            .max()
            .unwrap_or(0))
    }

    async fn replace_member_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
        reason: &str,
    ) -> Result<(), RoleSyncError> {
        let builder = EditMember::new()
            .roles(role_ids.iter().map(|id| RoleId::new(*id)))
            .audit_log_reason(reason);

        GuildId::new(guild_id)
            .edit_member(&self.ctx.http, UserId::new(user_id), builder)
            .await?;

        Ok(())
    }
}
