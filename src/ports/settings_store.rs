//! Settings storage port.
//!
//! Reads and writes the host's option storage for the values role mapping
//! depends on: the membership-roles multicheck and the platform default role.

use crate::domain::foundation::{DomainError, RoleId};
use crate::domain::role_map::MulticheckSelection;
use async_trait::async_trait;

/// Port for host option storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored membership-roles selection.
    ///
    /// `None` when the option was never saved. Unreadable values must also
    /// come back as `None` rather than an error.
    async fn membership_roles_setting(&self) -> Result<Option<MulticheckSelection>, DomainError>;

    /// Overwrite the membership-roles selection.
    async fn save_membership_roles_setting(
        &self,
        selection: &MulticheckSelection,
    ) -> Result<(), DomainError>;

    /// Platform-wide role given to new and lapsed users.
    async fn default_role(&self) -> Result<RoleId, DomainError>;
}
