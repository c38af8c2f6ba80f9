//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (role mutations, setting saves) are kept apart from
//! query handlers (role lookups, admin table cells).

pub mod handlers;

pub use handlers::role_map;
