//! Role catalog owned by the host platform, and the membership-role names
//! resolved from it.

use serde::{Deserialize, Serialize};

use super::MembershipRoleSet;
use crate::domain::foundation::RoleId;

/// A role id with its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRole {
    pub id: RoleId,
    pub name: String,
}

impl NamedRole {
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Full role catalog of the host platform. Read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog {
    roles: Vec<NamedRole>,
}

impl RoleCatalog {
    /// Builds a catalog; later duplicates of an id are ignored.
    pub fn new<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = NamedRole>,
    {
        let mut catalog = Self::default();
        for role in roles {
            if !catalog.contains(&role.id) {
                catalog.roles.push(role);
            }
        }
        catalog
    }

    pub fn name_of(&self, id: &RoleId) -> Option<&str> {
        self.roles
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.name.as_str())
    }

    pub fn contains(&self, id: &RoleId) -> bool {
        self.roles.iter().any(|r| &r.id == id)
    }

    pub fn roles(&self) -> &[NamedRole] {
        &self.roles
    }

    /// Catalog entries sorted by display name, ascending. Stable for equal names.
    pub fn sorted_by_name(&self) -> Vec<NamedRole> {
        let mut roles = self.roles.clone();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }
}

/// Membership roles paired with their catalog display names.
///
/// Roles missing from the catalog are dropped, so every key here is a
/// catalog role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleNames {
    roles: Vec<NamedRole>,
}

impl RoleNames {
    /// Looks up each membership role in the catalog, keeping membership order.
    pub fn resolve(membership: &MembershipRoleSet, catalog: &RoleCatalog) -> Self {
        let roles = membership
            .iter()
            .filter_map(|id| {
                catalog
                    .name_of(id)
                    .map(|name| NamedRole::new(id.clone(), name))
            })
            .collect();
        Self { roles }
    }

    pub fn contains(&self, id: &RoleId) -> bool {
        self.roles.iter().any(|r| &r.id == id)
    }

    pub fn name_of(&self, id: &RoleId) -> Option<&str> {
        self.roles
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRole> {
        self.roles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RoleId> {
        self.roles.iter().map(|r| &r.id)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
