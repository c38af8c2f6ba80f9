//! Membership validity port.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// External check of whether a user's membership is still current.
///
/// Expiry rules (membership length, renewals) live in the host's
/// membership extension, not here.
#[async_trait]
pub trait MembershipValidity: Send + Sync {
    async fn is_membership_valid(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
