//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the role-map domain and the host commerce/content platform. Adapters
//! implement these ports.
//!
//! ## Platform Ports
//!
//! - `SettingsStore` - Option storage (membership roles setting, default role)
//! - `RoleCatalogProvider` - Full role catalog with display names
//! - `UserRoleStore` - Per-user role reads and add/remove mutations
//! - `MembershipValidity` - External membership expiry check
//!
//! ## Commerce Ports
//!
//! - `ProductCatalog` - Product type, membership-length flag, price tiers
//! - `PaymentRecords` - Buyer info and cart details of completed payments

mod membership_validity;
mod payment_records;
mod product_catalog;
mod role_catalog;
mod settings_store;
mod user_role_store;

pub use membership_validity::MembershipValidity;
pub use payment_records::PaymentRecords;
pub use product_catalog::ProductCatalog;
pub use role_catalog::RoleCatalogProvider;
pub use settings_store::SettingsStore;
pub use user_role_store::UserRoleStore;
