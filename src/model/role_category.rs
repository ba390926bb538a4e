//! Role-category reconciler models.
//!
//! Category roles are "umbrella" roles that sit at the bottom of a block of more
//! specific roles: each one owns the positions from itself up to the next category
//! role. Members automatically receive the category role of every block in which they
//! hold at least one role.

use std::collections::HashSet;

/// Upper end of the interval owned by the highest category role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpperBound {
    /// The highest category owns every position above it.
    #[default]
    Unbounded,
    /// The highest category owns positions below this sentinel.
    Fixed(u16),
}

/// Reconciler configuration injected at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCategoryConfig {
    /// Designated category role IDs in any order.
    pub category_role_ids: Vec<u64>,
    /// Roles that never count as evidence for a category.
    pub excluded_role_ids: HashSet<u64>,
    /// End of the last interval.
    pub upper_bound: UpperBound,
}

impl RoleCategoryConfig {
    pub fn is_enabled(&self) -> bool {
        !self.category_role_ids.is_empty()
    }
}

/// A role resolved against the live guild hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedRole {
    pub id: u64,
    pub position: u16,
}

/// Half-open position range `[low, high)` owned by one category role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInterval {
    pub category_id: u64,
    /// Position of the category role itself.
    pub low: u16,
    /// Position of the next category role, or `None` when unbounded.
    pub high: Option<u16>,
}

impl CategoryInterval {
    /// Whether `position` lies strictly between the category and the next boundary.
    pub fn contains(&self, position: u16) -> bool {
        position > self.low && self.high.map_or(true, |high| position < high)
    }
}

/// Category roles to add to and remove from a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePlan {
    pub to_add: Vec<u64>,
    pub to_remove: Vec<u64>,
}

impl RolePlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Applies the plan to a member's current role IDs, keeping the original order.
    pub fn apply(&self, held: &[u64]) -> Vec<u64> {
        let mut roles: Vec<u64> = held
            .iter()
            .copied()
            .filter(|id| !self.to_remove.contains(id))
            .collect();

        for id in &self.to_add {
            if !roles.contains(id) {
                roles.push(*id);
            }
        }

        roles
    }
}

/// Result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The member's categories already matched; nothing was written.
    Unchanged,
    /// A single bulk role update was applied.
    Applied { added: Vec<u64>, removed: Vec<u64> },
}
