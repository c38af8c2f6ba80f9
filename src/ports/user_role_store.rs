//! User role store port.
//!
//! Users are owned by the host platform. Role mapping never creates or
//! deletes users; it only adds and removes roles on them.
//!
//! # Consistency
//!
//! Each call is applied on its own. Two requests mutating the same user
//! interleave with last-write-wins results.

use crate::domain::foundation::{DomainError, RoleId, UserId};
use async_trait::async_trait;

/// Port for reading and mutating a user's role set.
#[async_trait]
pub trait UserRoleStore: Send + Sync {
    /// Roles currently held by the user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the host has no such user
    async fn roles_of(&self, user_id: &UserId) -> Result<Vec<RoleId>, DomainError>;

    /// Grant a role. Granting a held role is a no-op.
    async fn add_role(&self, user_id: &UserId, role: &RoleId) -> Result<(), DomainError>;

    /// Revoke a role. Revoking an absent role is a no-op.
    async fn remove_role(&self, user_id: &UserId, role: &RoleId) -> Result<(), DomainError>;
}
