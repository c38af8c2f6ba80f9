//! Role-map domain module.
//!
//! Translates membership purchases into user role assignments.
//!
//! # Module Structure
//!
//! - `membership_roles` - Stored multicheck setting and the resolved membership role set
//! - `catalog` - Host role catalog and membership role display names
//! - `product` - Product types and price tiers carrying a role
//! - `purchase` - Payment buyer info and cart details
//! - `price_table` - Cells contributed to the product price-tier admin table
//! - `settings` - Extension setting descriptors
//! - `reconcile` - Pure planning of role add/remove steps
//! - `errors` - Role-map error type

mod catalog;
mod errors;
mod membership_roles;
mod price_table;
mod product;
mod purchase;
mod reconcile;
mod settings;

pub use catalog::{NamedRole, RoleCatalog, RoleNames};
pub use errors::RoleMapError;
pub use membership_roles::{MembershipRoleSet, MulticheckEntry, MulticheckSelection};
pub use price_table::{
    role_field_name, PriceTableHeaderCell, RoleOption, RoleSelectorCell, ROLE_COLUMN_LABEL,
    TOGGLED_HIDE_CLASS,
};
pub use product::{tier_role, PriceTier, ProductType};
pub use purchase::{CartDetails, CartLineItem, PaymentUserInfo};
pub use reconcile::{RoleChange, RoleChangePlan};
pub use settings::{
    SettingDescriptor, SettingKind, SettingOption, MEMBERSHIP_ROLES_SETTING_ID,
};
