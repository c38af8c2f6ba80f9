//! MembershipRoleRegistry - Query side for membership roles and their names.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{RoleId, UserId};
use crate::domain::role_map::{MembershipRoleSet, RoleMapError, RoleNames};
use crate::ports::{RoleCatalogProvider, SettingsStore, UserRoleStore};

/// Resolves which roles count as membership roles and how they are named.
///
/// Every other role-map handler goes through this registry, so the
/// default-role fallback is applied in exactly one place.
pub struct MembershipRoleRegistry {
    settings: Arc<dyn SettingsStore>,
    catalog: Arc<dyn RoleCatalogProvider>,
}

impl MembershipRoleRegistry {
    pub fn new(settings: Arc<dyn SettingsStore>, catalog: Arc<dyn RoleCatalogProvider>) -> Self {
        Self { settings, catalog }
    }

    /// Platform default role.
    pub async fn default_role(&self) -> Result<RoleId, RoleMapError> {
        Ok(self.settings.default_role().await?)
    }

    /// Membership roles from the stored setting, or `[default_role]` when unset.
    ///
    /// A failing settings read counts as an unset setting.
    pub async fn membership_roles(&self) -> Result<MembershipRoleSet, RoleMapError> {
        let setting = match self.settings.membership_roles_setting().await {
            Ok(setting) => setting,
            Err(err) => {
                warn!("Membership roles setting unreadable, using default role: {}", err);
                None
            }
        };
        let default_role = self.default_role().await?;

        Ok(MembershipRoleSet::from_setting(setting.as_ref(), &default_role))
    }

    /// Membership roles with their catalog names; unknown roles are dropped.
    pub async fn membership_role_names(&self) -> Result<RoleNames, RoleMapError> {
        let membership = self.membership_roles().await?;
        let catalog = self.catalog.role_catalog().await?;

        Ok(RoleNames::resolve(&membership, &catalog))
    }

    /// True when the user holds at least one membership role.
    pub async fn user_has_membership_role(
        &self,
        users: &dyn UserRoleStore,
        user_id: &UserId,
    ) -> Result<bool, RoleMapError> {
        let held = users.roles_of(user_id).await?;
        Ok(self.membership_roles().await?.any_held_in(&held))
    }
}
