//! HTTP adapters - REST API implementations.

pub mod role_map;

pub use role_map::role_map_router;
pub use role_map::RoleMapAppState;
