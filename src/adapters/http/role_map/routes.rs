//! Axum router configuration for role-map endpoints.
//!
//! This module defines the route structure for role-map API endpoints
//! and wires them to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_membership_role_names, get_membership_roles, get_price_table_header, get_role_selector,
    get_settings_extensions, get_tier_role, get_user_membership, handle_purchase_complete,
    set_user_role, update_membership_roles, update_tier_role, validate_membership,
    RoleMapAppState,
};

/// Create the role-map API router.
///
/// # Routes
///
/// ## Settings
/// - `GET /roles` - Membership roles in effect
/// - `PUT /roles` - Replace the membership-roles setting
/// - `GET /roles/names` - Membership roles with display names
/// - `GET /settings/extensions` - Extension settings entries
///
/// ## Users
/// - `POST /validate` - Validate the visitor's membership
/// - `POST /users/:user_id/role` - Assign a membership role
/// - `GET /users/:user_id/membership` - Membership role check
///
/// ## Product admin
/// - `GET /products/:product_id/price-table/header` - Role column header cell
/// - `GET /products/:product_id/price-table/tiers/:tier_id/role-selector` - Role selector cell
/// - `GET|PUT /products/:product_id/tiers/:tier_id/role` - Read or save a tier role
pub fn role_map_routes() -> Router<RoleMapAppState> {
    Router::new()
        // Settings
        .route(
            "/roles",
            get(get_membership_roles).put(update_membership_roles),
        )
        .route("/roles/names", get(get_membership_role_names))
        .route("/settings/extensions", get(get_settings_extensions))
        // Users
        .route("/validate", post(validate_membership))
        .route("/users/:user_id/role", post(set_user_role))
        .route("/users/:user_id/membership", get(get_user_membership))
        // Product admin
        .route(
            "/products/:product_id/price-table/header",
            get(get_price_table_header),
        )
        .route(
            "/products/:product_id/price-table/tiers/:tier_id/role-selector",
            get(get_role_selector),
        )
        .route(
            "/products/:product_id/tiers/:tier_id/role",
            get(get_tier_role).put(update_tier_role),
        )
}

/// Create the commerce webhook router.
///
/// Separate from the main routes because the commerce platform calls it
/// without a user session.
///
/// # Routes
/// - `POST /purchase-complete/:payment_id` - Map a completed payment to a role
pub fn webhook_routes() -> Router<RoleMapAppState> {
    Router::new().route(
        "/purchase-complete/:payment_id",
        post(handle_purchase_complete),
    )
}

/// Create the complete role-map router, mounted at `/api/role-map`.
///
/// # Example
///
/// ```ignore
/// let state = RoleMapAppState::from_platform(Arc::new(platform));
/// let app = role_map_router().with_state(state);
/// ```
pub fn role_map_router() -> Router<RoleMapAppState> {
    Router::new().nest(
        "/api/role-map",
        role_map_routes().nest("/webhooks", webhook_routes()),
    )
}
