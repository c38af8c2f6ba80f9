//! ValidateMembershipHandler - Per-request membership check that reverts
//! lapsed members to the default role.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::set_user_role::apply_plan;
use super::MembershipRoleRegistry;
use crate::domain::foundation::{RoleId, UserId};
use crate::domain::role_map::{RoleChangePlan, RoleMapError};
use crate::ports::{MembershipValidity, UserRoleStore};

/// Command to validate the current visitor's membership.
#[derive(Debug, Clone)]
pub struct ValidateMembershipCommand {
    /// The authenticated user, `None` for anonymous requests.
    pub user_id: Option<UserId>,
}

/// Result of membership validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidateMembershipResult {
    /// No authenticated user.
    Anonymous,
    /// User holds no membership role.
    NotAMember,
    /// Membership is still valid.
    Valid,
    /// Membership lapsed but the user already holds only the default role.
    AlreadyDefault,
    /// Membership lapsed; user reverted to the default role.
    Demoted {
        removed: Vec<RoleId>,
        default_role: RoleId,
    },
}

/// Handler for membership validation.
///
/// Runs on every authenticated request. Repeating it after a demotion is
/// harmless: the user no longer holds a membership role other than,
/// possibly, the default role.
pub struct ValidateMembershipHandler {
    registry: Arc<MembershipRoleRegistry>,
    users: Arc<dyn UserRoleStore>,
    validity: Arc<dyn MembershipValidity>,
}

impl ValidateMembershipHandler {
    pub fn new(
        registry: Arc<MembershipRoleRegistry>,
        users: Arc<dyn UserRoleStore>,
        validity: Arc<dyn MembershipValidity>,
    ) -> Self {
        Self {
            registry,
            users,
            validity,
        }
    }

    pub async fn handle(
        &self,
        cmd: ValidateMembershipCommand,
    ) -> Result<ValidateMembershipResult, RoleMapError> {
        let Some(user_id) = cmd.user_id else {
            return Ok(ValidateMembershipResult::Anonymous);
        };

        let current = self.users.roles_of(&user_id).await?;
        let membership = self.registry.membership_roles().await?;

        if !membership.any_held_in(&current) {
            return Ok(ValidateMembershipResult::NotAMember);
        }

        if self.validity.is_membership_valid(&user_id).await? {
            return Ok(ValidateMembershipResult::Valid);
        }

        let default_role = self.registry.default_role().await?;
        let plan = RoleChangePlan::demote(&current, &membership, &default_role);
        if plan.is_empty() {
            debug!(user_id = %user_id, "Lapsed member already holds only the default role");
            return Ok(ValidateMembershipResult::AlreadyDefault);
        }

        apply_plan(self.users.as_ref(), &user_id, &plan).await?;

        let removed = plan.removed();
        info!(
            user_id = %user_id,
            removed = ?removed,
            default_role = %default_role,
            "Membership lapsed, reverted to default role"
        );

        Ok(ValidateMembershipResult::Demoted {
            removed,
            default_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::platform::{InMemoryPlatform, MembershipTerm};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::role_map::MulticheckSelection;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    fn user() -> UserId {
        UserId::new("member-7").unwrap()
    }

    fn platform(roles: &[&str], term: Option<MembershipTerm>) -> Arc<InMemoryPlatform> {
        let mut builder = InMemoryPlatform::builder()
            .record_mutations()
            .default_role(role("subscriber"))
            .role(role("subscriber"), "Subscriber")
            .role(role("gold"), "Gold")
            .role(role("silver"), "Silver")
            .membership_roles(MulticheckSelection::enabled([role("gold"), role("silver")]))
            .user(user(), roles.iter().map(|r| role(r)));
        if let Some(term) = term {
            builder = builder.membership(user(), term);
        }
        Arc::new(builder.build())
    }

    fn handler(platform: &Arc<InMemoryPlatform>) -> ValidateMembershipHandler {
        let registry = Arc::new(MembershipRoleRegistry::new(platform.clone(), platform.clone()));
        ValidateMembershipHandler::new(registry, platform.clone(), platform.clone())
    }

    fn expired() -> Option<MembershipTerm> {
        Some(MembershipTerm::ExpiresAt(Utc::now() - Duration::days(3)))
    }

    fn cmd() -> ValidateMembershipCommand {
        ValidateMembershipCommand {
            user_id: Some(user()),
        }
    }

    #[tokio::test]
    async fn anonymous_request_is_a_no_op() {
        let platform = platform(&["gold"], expired());

        let result = handler(&platform)
            .handle(ValidateMembershipCommand { user_id: None })
            .await
            .unwrap();

        assert_eq!(result, ValidateMembershipResult::Anonymous);
        assert!(platform.mutation_calls().is_empty());
    }

    #[tokio::test]
    async fn non_member_is_left_alone() {
        let platform = platform(&["editor"], expired());

        let result = handler(&platform).handle(cmd()).await.unwrap();

        assert_eq!(result, ValidateMembershipResult::NotAMember);
        assert_eq!(platform.user_roles(&user()), Some(vec![role("editor")]));
    }

    #[tokio::test]
    async fn valid_member_is_left_alone() {
        let platform = platform(&["gold"], Some(MembershipTerm::Lifetime));

        let result = handler(&platform).handle(cmd()).await.unwrap();

        assert_eq!(result, ValidateMembershipResult::Valid);
        assert_eq!(platform.user_roles(&user()), Some(vec![role("gold")]));
        assert!(platform.mutation_calls().is_empty());
    }

    #[tokio::test]
    async fn lapsed_member_is_demoted_to_default_role() {
        let platform = platform(&["gold", "silver", "editor"], expired());

        let result = handler(&platform).handle(cmd()).await.unwrap();

        assert_eq!(
            result,
            ValidateMembershipResult::Demoted {
                removed: vec![role("gold"), role("silver")],
                default_role: role("subscriber"),
            }
        );
        let mut roles = platform.user_roles(&user()).unwrap();
        roles.sort();
        assert_eq!(roles, vec![role("editor"), role("subscriber")]);
    }

    #[tokio::test]
    async fn member_without_membership_record_is_demoted() {
        let platform = platform(&["silver"], None);

        let result = handler(&platform).handle(cmd()).await.unwrap();

        assert!(matches!(result, ValidateMembershipResult::Demoted { .. }));
        assert_eq!(platform.user_roles(&user()), Some(vec![role("subscriber")]));
    }

    #[tokio::test]
    async fn repeated_validation_after_demotion_changes_nothing() {
        let platform = platform(&["gold"], expired());
        let handler = handler(&platform);

        handler.handle(cmd()).await.unwrap();
        let after_first = platform.user_roles(&user());
        let second = handler.handle(cmd()).await.unwrap();

        assert_eq!(second, ValidateMembershipResult::NotAMember);
        assert_eq!(platform.user_roles(&user()), after_first);
    }

    #[tokio::test]
    async fn default_role_only_member_needs_no_changes() {
        let platform = Arc::new(
            InMemoryPlatform::builder()
                .record_mutations()
                .default_role(role("subscriber"))
                .role(role("subscriber"), "Subscriber")
                .user(user(), [role("subscriber")])
                .build(),
        );

        let result = handler(&platform).handle(cmd()).await.unwrap();

        assert_eq!(result, ValidateMembershipResult::AlreadyDefault);
        assert!(platform.mutation_calls().is_empty());
    }

    struct FailingValidity;

    #[async_trait]
    impl MembershipValidity for FailingValidity {
        async fn is_membership_valid(&self, _user_id: &UserId) -> Result<bool, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "membership lookup failed"))
        }
    }

    #[tokio::test]
    async fn validity_failure_propagates_without_mutation() {
        let platform = platform(&["gold"], None);
        let registry = Arc::new(MembershipRoleRegistry::new(platform.clone(), platform.clone()));
        let handler =
            ValidateMembershipHandler::new(registry, platform.clone(), Arc::new(FailingValidity));

        let result = handler.handle(cmd()).await;

        assert!(matches!(result, Err(RoleMapError::Infrastructure(_))));
        assert!(platform.mutation_calls().is_empty());
    }
}
