//! UpdateMembershipRolesHandler - Saves the membership-roles setting.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::foundation::RoleId;
use crate::domain::role_map::{MulticheckSelection, RoleMapError};
use crate::ports::{RoleCatalogProvider, SettingsStore};

/// Command replacing the stored selection.
#[derive(Debug, Clone)]
pub struct UpdateMembershipRolesCommand {
    pub selection: MulticheckSelection,
}

/// What was stored. Unticked entries are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMembershipRolesResult {
    pub stored: MulticheckSelection,
    /// Submitted roles that are not in the catalog.
    pub dropped: Vec<RoleId>,
}

pub struct UpdateMembershipRolesHandler {
    settings: Arc<dyn SettingsStore>,
    catalog: Arc<dyn RoleCatalogProvider>,
}

impl UpdateMembershipRolesHandler {
    pub fn new(settings: Arc<dyn SettingsStore>, catalog: Arc<dyn RoleCatalogProvider>) -> Self {
        Self { settings, catalog }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMembershipRolesCommand,
    ) -> Result<UpdateMembershipRolesResult, RoleMapError> {
        let catalog = self.catalog.role_catalog().await?;

        let dropped: Vec<RoleId> = cmd
            .selection
            .keys()
            .filter(|role| !catalog.contains(role))
            .cloned()
            .collect();
        if !dropped.is_empty() {
            warn!(dropped = ?dropped, "Ignoring roles missing from the role catalog");
        }

        let mut stored = cmd.selection;
        stored.retain(|entry| entry.enabled && catalog.contains(&entry.role));

        self.settings.save_membership_roles_setting(&stored).await?;
        info!(roles = stored.len(), "Membership roles setting saved");

        Ok(UpdateMembershipRolesResult { stored, dropped })
    }
}
