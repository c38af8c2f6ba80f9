//! Role reconciliation plans.
//!
//! Pure planning of the add/remove calls needed to move a user's role set
//! into its target shape. Handlers execute the steps in order against
//! the user role store.

use serde::Serialize;

use super::{MembershipRoleSet, RoleNames};
use crate::domain::foundation::RoleId;

/// A single role mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "role", rename_all = "snake_case")]
pub enum RoleChange {
    Add(RoleId),
    Remove(RoleId),
}

/// Ordered role mutations for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleChangePlan {
    steps: Vec<RoleChange>,
}

impl RoleChangePlan {
    /// Plan for granting `target` and dropping every other allowed role.
    ///
    /// The add step precedes the removals. Roles outside `allowed` are
    /// never touched.
    pub fn assign(current: &[RoleId], target: &RoleId, allowed: &RoleNames) -> Self {
        let mut steps = Vec::new();

        if !current.contains(target) {
            steps.push(RoleChange::Add(target.clone()));
        }

        steps.extend(
            allowed
                .ids()
                .filter(|role| *role != target && current.contains(role))
                .cloned()
                .map(RoleChange::Remove),
        );

        Self { steps }
    }

    /// Plan for reverting a lapsed member to the default role.
    ///
    /// Removes every held membership role, then ensures the default role.
    /// When the default role is itself a membership role the user already
    /// holds, it is kept rather than removed and re-added.
    pub fn demote(current: &[RoleId], membership: &MembershipRoleSet, default_role: &RoleId) -> Self {
        let mut steps: Vec<RoleChange> = membership
            .held_in(current)
            .into_iter()
            .filter(|role| role != default_role)
            .map(RoleChange::Remove)
            .collect();

        if !current.contains(default_role) {
            steps.push(RoleChange::Add(default_role.clone()));
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[RoleChange] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn added(&self) -> Vec<RoleId> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                RoleChange::Add(role) => Some(role.clone()),
                RoleChange::Remove(_) => None,
            })
            .collect()
    }

    pub fn removed(&self) -> Vec<RoleId> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                RoleChange::Remove(role) => Some(role.clone()),
                RoleChange::Add(_) => None,
            })
            .collect()
    }

    /// Applies the plan to an in-memory role list.
    pub fn apply_to(&self, roles: &mut Vec<RoleId>) {
        for step in &self.steps {
            match step {
                RoleChange::Add(role) => {
                    if !roles.contains(role) {
                        roles.push(role.clone());
                    }
                }
                RoleChange::Remove(role) => roles.retain(|r| r != role),
            }
        }
    }
}
