//! Extension setting descriptors contributed to the host settings page.

use serde::{Deserialize, Serialize};

use super::RoleCatalog;

/// Id of the membership-roles multicheck setting.
pub const MEMBERSHIP_ROLES_SETTING_ID: &str = "membershipRoles";

/// Input type the host renders for a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Header,
    Multicheck,
}

/// A selectable value of a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOption {
    pub value: String,
    pub label: String,
}

/// One entry in the host's extension settings list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    #[serde(default)]
    pub options: Vec<SettingOption>,
}

impl SettingDescriptor {
    /// The membership-roles multicheck, offering every catalog role sorted
    /// by display name.
    pub fn membership_roles(catalog: &RoleCatalog) -> Self {
        let options = catalog
            .sorted_by_name()
            .into_iter()
            .map(|role| SettingOption {
                value: role.id.to_string(),
                label: role.name,
            })
            .collect();

        Self {
            id: MEMBERSHIP_ROLES_SETTING_ID.to_string(),
            name: "Membership Roles".to_string(),
            desc: "Select which roles can be mapped to membership pricing options.".to_string(),
            kind: SettingKind::Multicheck,
            options,
        }
    }
}
