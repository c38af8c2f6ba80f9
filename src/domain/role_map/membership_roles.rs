//! Membership role set and the stored multicheck selection it is built from.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::RoleId;

/// One entry of a stored multicheck setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticheckEntry {
    pub role: RoleId,
    pub enabled: bool,
}

/// Stored value of the membership-roles multicheck setting.
///
/// An ordered mapping of role id to enabled flag. Keys are unique; inserting
/// an existing key updates its flag in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MulticheckSelection {
    entries: Vec<MulticheckEntry>,
}

impl<'de> Deserialize<'de> for MulticheckSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut selection = Self::new();
        for entry in Vec::<MulticheckEntry>::deserialize(deserializer)? {
            selection.insert(entry.role, entry.enabled);
        }
        Ok(selection)
    }
}

impl MulticheckSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection with every given role enabled.
    pub fn enabled<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = RoleId>,
    {
        let mut selection = Self::new();
        for role in roles {
            selection.insert(role, true);
        }
        selection
    }

    /// Inserts or updates an entry.
    pub fn insert(&mut self, role: RoleId, enabled: bool) {
        match self.entries.iter_mut().find(|e| e.role == role) {
            Some(entry) => entry.enabled = enabled,
            None => self.entries.push(MulticheckEntry { role, enabled }),
        }
    }

    /// Keeps only the entries matching the predicate.
    pub fn retain(&mut self, keep: impl FnMut(&MulticheckEntry) -> bool) {
        self.entries.retain(keep);
    }

    /// All stored keys, in stored order, whatever their flag.
    pub fn keys(&self) -> impl Iterator<Item = &RoleId> {
        self.entries.iter().map(|e| &e.role)
    }

    pub fn entries(&self) -> &[MulticheckEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ordered set of roles designated as membership roles.
///
/// Never empty: an unset or empty setting degrades to the platform default
/// role on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MembershipRoleSet {
    roles: Vec<RoleId>,
}

impl MembershipRoleSet {
    /// Resolves the membership roles from the stored setting.
    ///
    /// Every stored key counts, enabled or not. Writers store ticked roles
    /// only, so the flag carries no extra meaning here.
    pub fn from_setting(setting: Option<&MulticheckSelection>, default_role: &RoleId) -> Self {
        match setting {
            Some(selection) if !selection.is_empty() => Self {
                roles: selection.keys().cloned().collect(),
            },
            _ => Self {
                roles: vec![default_role.clone()],
            },
        }
    }

    pub fn contains(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleId> {
        self.roles.iter()
    }

    pub fn as_slice(&self) -> &[RoleId] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Membership roles present in `held`, in membership-set order.
    pub fn held_in(&self, held: &[RoleId]) -> Vec<RoleId> {
        self.roles
            .iter()
            .filter(|role| held.contains(role))
            .cloned()
            .collect()
    }

    /// True when `held` contains at least one membership role.
    pub fn any_held_in(&self, held: &[RoleId]) -> bool {
        self.roles.iter().any(|role| held.contains(role))
    }
}
