//! HTTP DTOs (Data Transfer Objects) for role-map endpoints.
//!
//! These types define the JSON request/response structure for the role-map API.
//! Handler outcomes (`SetUserRoleResult` and friends) serialize directly and
//! have no wrapper here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PriceTierId, ProductId, RoleId, UserId};
use crate::domain::role_map::{MembershipRoleSet, MulticheckSelection, RoleNames, SettingDescriptor};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to replace the membership-roles setting.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMembershipRolesRequest {
    /// Ordered `{ role, enabled }` entries.
    pub roles: MulticheckSelection,
}

/// Request to move a user onto a membership role.
#[derive(Debug, Clone, Deserialize)]
pub struct SetUserRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

/// Request to store or clear a price tier's role.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTierRoleRequest {
    /// `null` or absent clears the role.
    #[serde(default)]
    pub role: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Membership roles currently in effect.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipRolesResponse {
    pub roles: MembershipRoleSet,
    pub default_role: RoleId,
}

/// Membership role with its display name.
#[derive(Debug, Clone, Serialize)]
pub struct RoleNameResponse {
    pub id: RoleId,
    pub name: String,
}

/// Membership roles resolved against the role catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RoleNamesResponse {
    pub roles: Vec<RoleNameResponse>,
}

impl From<RoleNames> for RoleNamesResponse {
    fn from(names: RoleNames) -> Self {
        Self {
            roles: names
                .iter()
                .map(|role| RoleNameResponse {
                    id: role.id.clone(),
                    name: role.name.clone(),
                })
                .collect(),
        }
    }
}

/// Extension settings list with the membership-roles entry appended.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub settings: Vec<SettingDescriptor>,
}

/// Whether a user holds a membership role.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipCheckResponse {
    pub user_id: UserId,
    pub has_membership_role: bool,
}

/// Role stored on a price tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierRoleResponse {
    pub product_id: ProductId,
    pub tier_id: PriceTierId,
    pub role: Option<RoleId>,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role_map::{MembershipRoleSet, NamedRole, RoleCatalog};
    use serde_json::json;

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    #[test]
    fn update_membership_roles_request_keeps_entry_order() {
        let request: UpdateMembershipRolesRequest = serde_json::from_value(json!({
            "roles": [
                {"role": "silver", "enabled": true},
                {"role": "gold", "enabled": false}
            ]
        }))
        .unwrap();

        let keys: Vec<_> = request.roles.keys().cloned().collect();
        assert_eq!(keys, vec![role("silver"), role("gold")]);
    }

    #[test]
    fn tier_role_request_accepts_null_and_missing_role() {
        let explicit: UpdateTierRoleRequest = serde_json::from_value(json!({"role": null})).unwrap();
        let missing: UpdateTierRoleRequest = serde_json::from_value(json!({})).unwrap();
        assert!(explicit.role.is_none());
        assert!(missing.role.is_none());
    }

    #[test]
    fn role_names_response_lists_resolved_roles() {
        let catalog = RoleCatalog::new([
            NamedRole::new(role("gold"), "Gold"),
            NamedRole::new(role("silver"), "Silver"),
        ]);
        let membership = MembershipRoleSet::from_setting(
            Some(&MulticheckSelection::enabled([role("silver"), role("gold")])),
            &role("subscriber"),
        );

        let response = RoleNamesResponse::from(RoleNames::resolve(&membership, &catalog));

        let value = serde_json::to_value(response).unwrap();
        assert_eq!(
            value,
            json!({"roles": [
                {"id": "silver", "name": "Silver"},
                {"id": "gold", "name": "Gold"}
            ]})
        );
    }

    #[test]
    fn error_response_omits_missing_details() {
        let value = serde_json::to_value(ErrorResponse::new("USER_NOT_FOUND", "gone")).unwrap();
        assert_eq!(value, json!({"error_code": "USER_NOT_FOUND", "message": "gone"}));
    }
}
