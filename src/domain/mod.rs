//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `role_map` - Membership roles, price-tier roles and role reconciliation

pub mod foundation;
pub mod role_map;
