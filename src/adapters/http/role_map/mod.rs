//! HTTP adapter for role-map endpoints.
//!
//! Exposes the host lifecycle points as a REST API under `/api/role-map`:
//! - `GET|PUT /roles` - Membership roles setting
//! - `GET /roles/names` - Membership roles with display names
//! - `GET /settings/extensions` - Extension settings entries
//! - `POST /validate` - Per-request membership validation
//! - `POST /users/:user_id/role` - Assign a membership role
//! - `GET /users/:user_id/membership` - Membership role check
//! - `GET /products/:product_id/price-table/...` - Price-table role column cells
//! - `GET|PUT /products/:product_id/tiers/:tier_id/role` - Tier role
//! - `POST /webhooks/purchase-complete/:payment_id` - Purchase completion

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuthenticatedUser, OptionalUser, RoleMapApiError, RoleMapAppState};
pub use routes::{role_map_router, role_map_routes, webhook_routes};
