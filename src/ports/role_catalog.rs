//! Role catalog port.

use crate::domain::foundation::DomainError;
use crate::domain::role_map::RoleCatalog;
use async_trait::async_trait;

/// Read-only access to the host's full role catalog.
#[async_trait]
pub trait RoleCatalogProvider: Send + Sync {
    /// Every role the host knows, with its display name.
    async fn role_catalog(&self) -> Result<RoleCatalog, DomainError>;
}
