//! SetUserRoleHandler - Command handler granting one membership role and
//! revoking the others.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::MembershipRoleRegistry;
use crate::domain::foundation::{RoleId, UserId};
use crate::domain::role_map::{RoleChange, RoleChangePlan, RoleMapError};
use crate::ports::UserRoleStore;

/// Command to move a user onto a membership role.
#[derive(Debug, Clone)]
pub struct SetUserRoleCommand {
    pub user_id: UserId,
    /// `None` when the caller had no role to offer (a tier without one).
    pub role: Option<RoleId>,
}

/// Result of a role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SetUserRoleResult {
    /// The user now holds `role` and no other membership role.
    Assigned {
        role: RoleId,
        added: bool,
        removed: Vec<RoleId>,
    },
    /// The role is not an allowed membership role; nothing changed.
    RoleNotAllowed { role: Option<RoleId> },
}

/// Handler for membership role assignment.
///
/// Roles outside the allowed membership set are left alone, so the user
/// keeps any editorial or administrative roles.
pub struct SetUserRoleHandler {
    registry: Arc<MembershipRoleRegistry>,
    users: Arc<dyn UserRoleStore>,
}

impl SetUserRoleHandler {
    pub fn new(registry: Arc<MembershipRoleRegistry>, users: Arc<dyn UserRoleStore>) -> Self {
        Self { registry, users }
    }

    pub async fn handle(&self, cmd: SetUserRoleCommand) -> Result<SetUserRoleResult, RoleMapError> {
        // 1. Only allowed membership roles can be assigned
        let allowed = self.registry.membership_role_names().await?;
        let role = match cmd.role {
            Some(role) if allowed.contains(&role) => role,
            other => {
                warn!(
                    user_id = %cmd.user_id,
                    role = ?other,
                    "Refusing to assign role outside membership roles"
                );
                return Ok(SetUserRoleResult::RoleNotAllowed { role: other });
            }
        };

        // 2. Plan against the user's current roles
        let current = self.users.roles_of(&cmd.user_id).await?;
        let plan = RoleChangePlan::assign(&current, &role, &allowed);

        // 3. Apply add-then-remove
        apply_plan(self.users.as_ref(), &cmd.user_id, &plan).await?;

        let added = plan.steps().contains(&RoleChange::Add(role.clone()));
        let removed = plan.removed();
        info!(
            user_id = %cmd.user_id,
            role = %role,
            added,
            removed = ?removed,
            "Membership role assigned"
        );

        Ok(SetUserRoleResult::Assigned {
            role,
            added,
            removed,
        })
    }
}

/// Executes each planned step against the store, in order.
pub(crate) async fn apply_plan(
    users: &dyn UserRoleStore,
    user_id: &UserId,
    plan: &RoleChangePlan,
) -> Result<(), RoleMapError> {
    for step in plan.steps() {
        match step {
            RoleChange::Add(role) => users.add_role(user_id, role).await?,
            RoleChange::Remove(role) => users.remove_role(user_id, role).await?,
        }
    }
    Ok(())
}
