//! Role-map handlers.
//!
//! Command and query handlers turning membership purchases into user roles:
//!
//! ## Commands
//! - Assigning a membership role to a user
//! - Mapping a completed purchase to its membership role
//! - Reverting lapsed members to the default role
//! - Saving a price tier's role
//! - Saving the membership-roles setting
//!
//! ## Queries
//! - Membership roles and their display names
//! - Price-table role column cells
//! - Extension setting descriptors

mod complete_purchase;
mod membership_roles;
mod price_option_role;
mod set_user_role;
mod settings_extensions;
mod update_membership_roles;
mod update_tier_role;
mod validate_membership;

// Commands
pub use complete_purchase::{
    CompletePurchaseCommand, CompletePurchaseHandler, CompletePurchaseResult,
};
pub use set_user_role::{SetUserRoleCommand, SetUserRoleHandler, SetUserRoleResult};
pub use update_membership_roles::{
    UpdateMembershipRolesCommand, UpdateMembershipRolesHandler, UpdateMembershipRolesResult,
};
pub use update_tier_role::{UpdateTierRoleCommand, UpdateTierRoleHandler, UpdateTierRoleResult};
pub use validate_membership::{
    ValidateMembershipCommand, ValidateMembershipHandler, ValidateMembershipResult,
};

// Queries
pub use membership_roles::MembershipRoleRegistry;
pub use price_option_role::PriceOptionRoleEditor;
pub use settings_extensions::SettingsContributor;
