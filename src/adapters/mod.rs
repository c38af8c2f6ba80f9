//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `platform` - In-memory host platform (settings, roles, users, products, payments)
//! - `http` - REST surface over the role-map handlers

pub mod http;
pub mod platform;

pub use platform::InMemoryPlatform;
