//! Cells contributed to the host's product price-tier admin table.
//!
//! The host renders these; this module only decides their content.

use serde::Serialize;

use super::RoleNames;
use crate::domain::foundation::{PriceTierId, RoleId};

/// CSS class the host toggles when membership length is switched on or off.
pub const TOGGLED_HIDE_CLASS: &str = "members-toggled-hide";

/// Label of the role column header.
pub const ROLE_COLUMN_LABEL: &str = "Role";

/// Form field name carrying the role selected for a tier.
pub fn role_field_name(tier_id: PriceTierId) -> String {
    format!("price_tiers[{}][role]", tier_id)
}

/// Header cell of the role column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceTableHeaderCell {
    pub label: String,
    pub css_class: String,
    /// Display hint only; hidden while membership length is disabled.
    pub hidden: bool,
}

impl PriceTableHeaderCell {
    pub fn new(hidden: bool) -> Self {
        Self {
            label: ROLE_COLUMN_LABEL.to_string(),
            css_class: TOGGLED_HIDE_CLASS.to_string(),
            hidden,
        }
    }
}

/// One option of the role selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub value: RoleId,
    pub label: String,
    pub selected: bool,
}

/// Role selector cell for one price tier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSelectorCell {
    pub tier_id: PriceTierId,
    pub field_name: String,
    pub css_class: String,
    pub hidden: bool,
    pub options: Vec<RoleOption>,
}

impl RoleSelectorCell {
    /// Builds the selector from the membership role names, marking the
    /// tier's current role as selected.
    pub fn build(
        tier_id: PriceTierId,
        names: &RoleNames,
        current: Option<&RoleId>,
        hidden: bool,
    ) -> Self {
        let options = names
            .iter()
            .map(|role| RoleOption {
                value: role.id.clone(),
                label: role.name.clone(),
                selected: current == Some(&role.id),
            })
            .collect();

        Self {
            tier_id,
            field_name: role_field_name(tier_id),
            css_class: TOGGLED_HIDE_CLASS.to_string(),
            hidden,
            options,
        }
    }

    pub fn selected(&self) -> Option<&RoleOption> {
        self.options.iter().find(|o| o.selected)
    }
}
