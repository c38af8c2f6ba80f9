//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod role_map;

pub use role_map::{
    // Commands
    CompletePurchaseCommand, CompletePurchaseHandler, CompletePurchaseResult,
    SetUserRoleCommand, SetUserRoleHandler, SetUserRoleResult,
    UpdateMembershipRolesCommand, UpdateMembershipRolesHandler, UpdateMembershipRolesResult,
    UpdateTierRoleCommand, UpdateTierRoleHandler, UpdateTierRoleResult,
    ValidateMembershipCommand, ValidateMembershipHandler, ValidateMembershipResult,
    // Queries
    MembershipRoleRegistry, PriceOptionRoleEditor, SettingsContributor,
};
