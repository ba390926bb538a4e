//! Role-category reconciler.
//!
//! Category roles partition the guild's role hierarchy: each category role owns the
//! positions from itself up to the next category role. A member receives a category
//! role exactly when they hold at least one ordinary role inside its interval.
//!
//! Role positions are read from a [`RoleDirectory`] on every run; nothing is cached
//! between events.

use std::collections::{HashMap, HashSet};

use serenity::async_trait;

use crate::{
    error::role_sync::RoleSyncError,
    model::role_category::{
        CategoryInterval, PositionedRole, ReconcileOutcome, RoleCategoryConfig, RolePlan,
        UpperBound,
    },
};

/// Audit log reason attached to every automatic role update.
pub const AUDIT_REASON: &str = "Automatic category assignment";

/// Source of live role positions and sink for member role updates.
///
/// Implemented over Serenity's cache and HTTP client in the bot layer and by an
/// in-memory fake in tests.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Positions of every role in the guild, keyed by role ID.
    async fn role_positions(&self, guild_id: u64) -> Result<HashMap<u64, u16>, RoleSyncError>;

    /// Position of the highest role held by the bot.
    async fn bot_top_position(&self, guild_id: u64) -> Result<u16, RoleSyncError>;

    /// Replaces the member's complete role set in a single request.
    async fn replace_member_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
        reason: &str,
    ) -> Result<(), RoleSyncError>;
}

/// Builds the contiguous intervals owned by each category role.
///
/// Categories are sorted by position ascending; each interval ends where the next
/// category starts and the last one ends at `upper_bound`.
pub fn intervals(categories: &[PositionedRole], upper_bound: UpperBound) -> Vec<CategoryInterval> {
    let mut sorted = categories.to_vec();
    sorted.sort_by_key(|role| (role.position, role.id));

    let last_high = match upper_bound {
        UpperBound::Unbounded => None,
        UpperBound::Fixed(bound) => Some(bound),
    };

    sorted
        .iter()
        .enumerate()
        .map(|(i, role)| CategoryInterval {
            category_id: role.id,
            low: role.position,
            high: sorted.get(i + 1).map(|next| next.position).or(last_high),
        })
        .collect()
}

/// Computes which category roles a member gains and loses.
///
/// # Arguments
/// - `categories` - Category roles present in the guild with their positions
/// - `held` - Roles the member holds, without the default role and excluded ordinary roles
/// - `bot_ceiling` - Position of the bot's highest role
/// - `upper_bound` - End of the last interval
///
/// # Returns
/// - `RolePlan` - Categories to add and remove; categories at or above `bot_ceiling`
///   never appear in it
pub fn plan(
    categories: &[PositionedRole],
    held: &[PositionedRole],
    bot_ceiling: u16,
    upper_bound: UpperBound,
) -> RolePlan {
    let category_ids: HashSet<u64> = categories.iter().map(|role| role.id).collect();
    let held_ids: HashSet<u64> = held.iter().map(|role| role.id).collect();

    let evidence: Vec<u16> = held
        .iter()
        .filter(|role| !category_ids.contains(&role.id))
        .map(|role| role.position)
        .collect();

    let mut result = RolePlan::default();

    for interval in intervals(categories, upper_bound) {
        if interval.low >= bot_ceiling {
            continue;
        }

        let occupied = evidence.iter().any(|position| interval.contains(*position));
        let has_category = held_ids.contains(&interval.category_id);

        if occupied && !has_category {
            result.to_add.push(interval.category_id);
        } else if !occupied && has_category {
            result.to_remove.push(interval.category_id);
        }
    }

    result
}

/// Keeps category roles in sync with the roles a member holds.
pub struct RoleCategoryService<'a, D: RoleDirectory> {
    directory: &'a D,
    config: &'a RoleCategoryConfig,
}

impl<'a, D: RoleDirectory> RoleCategoryService<'a, D> {
    pub fn new(directory: &'a D, config: &'a RoleCategoryConfig) -> Self {
        Self { directory, config }
    }

    /// Handles a member update event.
    ///
    /// Returns without touching the directory when the role set did not change. A
    /// missing `before` snapshot (member not cached) always reconciles.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the member
    /// - `user_id` - Member whose roles changed
    /// - `before` - Role IDs before the update, if known
    /// - `after` - Role IDs after the update
    pub async fn on_member_update(
        &self,
        guild_id: u64,
        user_id: u64,
        before: Option<&[u64]>,
        after: &[u64],
    ) -> Result<ReconcileOutcome, RoleSyncError> {
        if let Some(before) = before {
            let before: HashSet<u64> = before.iter().copied().collect();
            let after_set: HashSet<u64> = after.iter().copied().collect();
            if before == after_set {
                return Ok(ReconcileOutcome::Unchanged);
            }
        }

        self.reconcile(guild_id, user_id, after).await
    }

    /// Reconciles a member's category roles against the live role hierarchy.
    ///
    /// Configured category IDs that do not exist in the guild are skipped. The
    /// member's roles are written in one bulk update and only when the plan is
    /// non-empty.
    ///
    /// # Returns
    /// - `Ok(ReconcileOutcome::Unchanged)` - Nothing to change
    /// - `Ok(ReconcileOutcome::Applied { .. })` - Roles were replaced
    /// - `Err(RoleSyncError::PermissionDenied)` - The bot may not edit this member
    /// - `Err(RoleSyncError::Transient)` - Reading or writing roles failed otherwise
    pub async fn reconcile(
        &self,
        guild_id: u64,
        user_id: u64,
        held_role_ids: &[u64],
    ) -> Result<ReconcileOutcome, RoleSyncError> {
        if !self.config.is_enabled() {
            return Ok(ReconcileOutcome::Unchanged);
        }

        let positions = self.directory.role_positions(guild_id).await?;
        let bot_ceiling = self.directory.bot_top_position(guild_id).await?;

        let categories: Vec<PositionedRole> = self
            .config
            .category_role_ids
            .iter()
            .filter_map(|id| match positions.get(id) {
                Some(position) => Some(PositionedRole {
                    id: *id,
                    position: *position,
                }),
                None => {
                    tracing::debug!("Category role {} not found in guild {}", id, guild_id);
                    None
                }
            })
            .collect();

        // The @everyone role shares its ID with the guild. Exclusion only keeps a role
        // from counting as evidence; a held category role stays visible to the plan.
        let held: Vec<PositionedRole> = held_role_ids
            .iter()
            .filter(|id| **id != guild_id)
            .filter(|id| {
                !self.config.excluded_role_ids.contains(id)
                    || self.config.category_role_ids.contains(id)
            })
            .filter_map(|id| {
                positions.get(id).map(|position| PositionedRole {
                    id: *id,
                    position: *position,
                })
            })
            .collect();

        let role_plan = plan(&categories, &held, bot_ceiling, self.config.upper_bound);
        if role_plan.is_empty() {
            return Ok(ReconcileOutcome::Unchanged);
        }

        let assignable: Vec<u64> = held_role_ids
            .iter()
            .copied()
            .filter(|id| *id != guild_id)
            .collect();
        let roles = role_plan.apply(&assignable);
        self.directory
            .replace_member_roles(guild_id, user_id, &roles, AUDIT_REASON)
            .await?;

        Ok(ReconcileOutcome::Applied {
            added: role_plan.to_add,
            removed: role_plan.to_remove,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const GUILD: u64 = 1;
    const USER: u64 = 2;

    fn role(id: u64, position: u16) -> PositionedRole {
        PositionedRole { id, position }
    }

    struct FakeDirectory {
        positions: HashMap<u64, u16>,
        bot_top: u16,
        failure: Option<RoleSyncError>,
        lookups: Mutex<usize>,
        writes: Mutex<Vec<Vec<u64>>>,
    }

    impl FakeDirectory {
        fn new(positions: &[(u64, u16)], bot_top: u16) -> Self {
            Self {
                positions: positions.iter().copied().collect(),
                bot_top,
                failure: None,
                lookups: Mutex::new(0),
                writes: Mutex::new(Vec::new()),
            }
        }

        fn failing(mut self, err: RoleSyncError) -> Self {
            self.failure = Some(err);
            self
        }

        fn writes(&self) -> Vec<Vec<u64>> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RoleDirectory for FakeDirectory {
        async fn role_positions(&self, _guild_id: u64) -> Result<HashMap<u64, u16>, RoleSyncError> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self.positions.clone())
        }

        async fn bot_top_position(&self, _guild_id: u64) -> Result<u16, RoleSyncError> {
            Ok(self.bot_top)
        }

        async fn replace_member_roles(
            &self,
            _guild_id: u64,
            _user_id: u64,
            role_ids: &[u64],
            reason: &str,
        ) -> Result<(), RoleSyncError> {
            assert_eq!(reason, AUDIT_REASON);
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.writes.lock().unwrap().push(role_ids.to_vec());
            Ok(())
        }
    }

    fn config(categories: &[u64]) -> RoleCategoryConfig {
        RoleCategoryConfig {
            category_role_ids: categories.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn intervals_are_contiguous_and_sorted() {
        let result = intervals(&[role(15, 15), role(5, 5), role(10, 10)], UpperBound::Fixed(999));

        assert_eq!(
            result,
            vec![
                CategoryInterval { category_id: 5, low: 5, high: Some(10) },
                CategoryInterval { category_id: 10, low: 10, high: Some(15) },
                CategoryInterval { category_id: 15, low: 15, high: Some(999) },
            ]
        );
    }

    #[test]
    fn each_position_maps_to_one_interval() {
        let result = intervals(&[role(5, 5), role(10, 10), role(15, 15)], UpperBound::Unbounded);

        for position in 6..40u16 {
            if [10, 15].contains(&position) {
                continue;
            }
            let owners = result.iter().filter(|i| i.contains(position)).count();
            assert_eq!(owners, 1, "position {} has {} owners", position, owners);
        }
    }

    #[test]
    fn adds_matching_category_and_removes_empty_ones() {
        let categories = [role(5, 5), role(10, 10), role(15, 15)];
        let held = [role(5, 5), role(15, 15), role(12, 12)];

        let result = plan(&categories, &held, 100, UpperBound::Unbounded);

        assert_eq!(result.to_add, vec![10]);
        assert_eq!(result.to_remove, vec![5, 15]);
    }

    #[test]
    fn removes_all_categories_without_ordinary_roles() {
        let categories = [role(5, 5), role(10, 10)];
        let held = [role(5, 5), role(10, 10)];

        let result = plan(&categories, &held, 100, UpperBound::Unbounded);

        assert!(result.to_add.is_empty());
        assert_eq!(result.to_remove, vec![5, 10]);
    }

    #[test]
    fn skips_categories_at_or_above_bot_ceiling() {
        let categories = [role(5, 5), role(10, 10)];
        let held = [role(7, 7), role(12, 12)];

        let result = plan(&categories, &held, 10, UpperBound::Unbounded);

        assert_eq!(result.to_add, vec![5]);
        assert!(!result.to_add.contains(&10));
        assert!(!result.to_remove.contains(&10));
    }

    #[test]
    fn fixed_upper_bound_limits_last_interval() {
        let categories = [role(5, 5)];
        let held = [role(50, 50)];

        let bounded = plan(&categories, &held, 100, UpperBound::Fixed(20));
        let unbounded = plan(&categories, &held, 100, UpperBound::Unbounded);

        assert!(bounded.is_empty());
        assert_eq!(unbounded.to_add, vec![5]);
    }

    #[test]
    fn plan_apply_keeps_other_roles() {
        let role_plan = RolePlan {
            to_add: vec![10],
            to_remove: vec![5],
        };

        assert_eq!(role_plan.apply(&[5, 12, 30]), vec![12, 30, 10]);
    }

    #[tokio::test]
    async fn applies_single_bulk_update() {
        let directory = FakeDirectory::new(&[(GUILD, 0), (5, 5), (10, 10), (12, 12)], 50);
        let config = config(&[5, 10]);
        let service = RoleCategoryService::new(&directory, &config);

        let outcome = service.reconcile(GUILD, USER, &[GUILD, 5, 12]).await.unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Applied {
                added: vec![10],
                removed: vec![5],
            }
        );
        assert_eq!(directory.writes(), vec![vec![12, 10]]);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let directory = FakeDirectory::new(&[(5, 5), (10, 10), (12, 12)], 50);
        let config = config(&[5, 10]);
        let service = RoleCategoryService::new(&directory, &config);

        service.reconcile(GUILD, USER, &[5, 12]).await.unwrap();
        let applied = directory.writes()[0].clone();
        let outcome = service.reconcile(GUILD, USER, &applied).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert_eq!(directory.writes().len(), 1);
    }

    #[tokio::test]
    async fn identical_before_and_after_skips_lookup() {
        let directory = FakeDirectory::new(&[(5, 5), (12, 12)], 50);
        let config = config(&[5]);
        let service = RoleCategoryService::new(&directory, &config);

        let outcome = service
            .on_member_update(GUILD, USER, Some(&[12, 5]), &[5, 12])
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert_eq!(*directory.lookups.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn changed_role_set_reconciles() {
        let directory = FakeDirectory::new(&[(5, 5), (12, 12)], 50);
        let config = config(&[5]);
        let service = RoleCategoryService::new(&directory, &config);

        let outcome = service
            .on_member_update(GUILD, USER, Some(&[]), &[12])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Applied {
                added: vec![5],
                removed: vec![],
            }
        );
        assert_eq!(directory.writes(), vec![vec![12, 5]]);
    }

    #[tokio::test]
    async fn missing_and_excluded_roles_are_ignored() {
        let directory = FakeDirectory::new(&[(5, 5), (8, 8)], 50);
        let mut config = config(&[5, 404]);
        config.excluded_role_ids.insert(8);
        let service = RoleCategoryService::new(&directory, &config);

        let outcome = service.reconcile(GUILD, USER, &[8]).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert!(directory.writes().is_empty());
    }

    #[tokio::test]
    async fn excluded_category_role_is_still_seen_as_held() {
        let directory = FakeDirectory::new(&[(5, 5), (7, 7)], 50);
        let mut config = config(&[5]);
        config.excluded_role_ids.insert(5);
        let service = RoleCategoryService::new(&directory, &config);

        for _ in 0..3 {
            let outcome = service.reconcile(GUILD, USER, &[5, 7]).await.unwrap();
            assert_eq!(outcome, ReconcileOutcome::Unchanged);
        }

        assert!(directory.writes().is_empty());
    }

    #[tokio::test]
    async fn permission_denied_is_reported() {
        let directory = FakeDirectory::new(&[(5, 5), (12, 12)], 50)
            .failing(RoleSyncError::PermissionDenied("Missing Permissions".to_string()));
        let config = config(&[5]);
        let service = RoleCategoryService::new(&directory, &config);

        let result = service.reconcile(GUILD, USER, &[12]).await;

        assert!(matches!(result, Err(RoleSyncError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn disabled_without_categories() {
        let directory = FakeDirectory::new(&[(12, 12)], 50);
        let config = RoleCategoryConfig::default();
        let service = RoleCategoryService::new(&directory, &config);

        let outcome = service.reconcile(GUILD, USER, &[12]).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert_eq!(*directory.lookups.lock().unwrap(), 0);
    }
}
