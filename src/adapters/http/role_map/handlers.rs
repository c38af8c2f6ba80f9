//! HTTP handlers for role-map endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::application::handlers::role_map::{
    CompletePurchaseCommand, CompletePurchaseHandler, MembershipRoleRegistry,
    PriceOptionRoleEditor, SetUserRoleCommand, SetUserRoleHandler, SettingsContributor,
    UpdateMembershipRolesCommand, UpdateMembershipRolesHandler, UpdateTierRoleCommand,
    UpdateTierRoleHandler, ValidateMembershipCommand, ValidateMembershipHandler,
};
use crate::domain::foundation::{
    DomainError, PaymentId, PriceTierId, ProductId, RoleId, UserId, ValidationError,
};
use crate::domain::role_map::RoleMapError;
use crate::ports::{
    MembershipValidity, PaymentRecords, ProductCatalog, RoleCatalogProvider, SettingsStore,
    UserRoleStore,
};

use super::dto::{
    ErrorResponse, MembershipCheckResponse, MembershipRolesResponse, RoleNamesResponse,
    SetUserRoleRequest, SettingsResponse, TierRoleResponse, UpdateMembershipRolesRequest,
    UpdateTierRoleRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; handlers are created on demand from the
/// Arc-wrapped ports.
#[derive(Clone)]
pub struct RoleMapAppState {
    pub settings: Arc<dyn SettingsStore>,
    pub catalog: Arc<dyn RoleCatalogProvider>,
    pub users: Arc<dyn UserRoleStore>,
    pub validity: Arc<dyn MembershipValidity>,
    pub products: Arc<dyn ProductCatalog>,
    pub payments: Arc<dyn PaymentRecords>,
}

impl RoleMapAppState {
    /// State backed by a single adapter implementing every port.
    pub fn from_platform<P>(platform: Arc<P>) -> Self
    where
        P: SettingsStore
            + RoleCatalogProvider
            + UserRoleStore
            + MembershipValidity
            + ProductCatalog
            + PaymentRecords
            + 'static,
    {
        Self {
            settings: platform.clone(),
            catalog: platform.clone(),
            users: platform.clone(),
            validity: platform.clone(),
            products: platform.clone(),
            payments: platform,
        }
    }

    pub fn registry(&self) -> Arc<MembershipRoleRegistry> {
        Arc::new(MembershipRoleRegistry::new(
            self.settings.clone(),
            self.catalog.clone(),
        ))
    }

    pub fn set_user_role_handler(&self) -> SetUserRoleHandler {
        SetUserRoleHandler::new(self.registry(), self.users.clone())
    }

    pub fn validate_membership_handler(&self) -> ValidateMembershipHandler {
        ValidateMembershipHandler::new(
            self.registry(),
            self.users.clone(),
            self.validity.clone(),
        )
    }

    pub fn price_option_role_editor(&self) -> PriceOptionRoleEditor {
        PriceOptionRoleEditor::new(self.registry(), self.products.clone())
    }

    pub fn update_tier_role_handler(&self) -> UpdateTierRoleHandler {
        UpdateTierRoleHandler::new(self.registry(), self.products.clone())
    }

    pub fn complete_purchase_handler(&self) -> CompletePurchaseHandler {
        CompletePurchaseHandler::new(
            self.payments.clone(),
            self.products.clone(),
            Arc::new(self.set_user_role_handler()),
        )
    }

    pub fn settings_contributor(&self) -> SettingsContributor {
        SettingsContributor::new(self.catalog.clone())
    }

    pub fn update_membership_roles_handler(&self) -> UpdateMembershipRolesHandler {
        UpdateMembershipRolesHandler::new(self.settings.clone(), self.catalog.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (would come from the host's session in production)
// ════════════════════════════════════════════════════════════════════════════════

const USER_ID_HEADER: &str = "X-User-Id";

fn user_from_parts(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| UserId::new(s).ok())
}

/// Authenticated user context extracted from request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = user_from_parts(parts).ok_or(AuthenticationRequired)?;
        Ok(AuthenticatedUser { user_id })
    }
}

/// Visitor that may or may not be logged in.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<UserId>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(user_from_parts(parts)))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/role-map/roles - Membership roles in effect
pub async fn get_membership_roles(
    State(state): State<RoleMapAppState>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let registry = state.registry();
    let roles = registry.membership_roles().await?;
    let default_role = registry.default_role().await?;

    Ok(Json(MembershipRolesResponse {
        roles,
        default_role,
    }))
}

/// GET /api/role-map/roles/names - Membership roles with display names
pub async fn get_membership_role_names(
    State(state): State<RoleMapAppState>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let names = state.registry().membership_role_names().await?;
    Ok(Json(RoleNamesResponse::from(names)))
}

/// GET /api/role-map/settings/extensions - Extension settings entries
pub async fn get_settings_extensions(
    State(state): State<RoleMapAppState>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let settings = state.settings_contributor().contribute(Vec::new()).await?;
    Ok(Json(SettingsResponse { settings }))
}

/// GET /api/role-map/users/:user_id/membership - Membership role check
pub async fn get_user_membership(
    State(state): State<RoleMapAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let user_id = UserId::new(user_id)?;
    let has_membership_role = state
        .registry()
        .user_has_membership_role(state.users.as_ref(), &user_id)
        .await?;

    Ok(Json(MembershipCheckResponse {
        user_id,
        has_membership_role,
    }))
}

/// GET /api/role-map/products/:product_id/price-table/header
///
/// 204 for bundle products.
pub async fn get_price_table_header(
    State(state): State<RoleMapAppState>,
    Path(product_id): Path<String>,
) -> Result<Response, RoleMapApiError> {
    let product_id: ProductId = parse_path("product_id", &product_id)?;
    let cell = state
        .price_option_role_editor()
        .render_header(product_id)
        .await?;
    Ok(json_or_no_content(cell))
}

/// GET /api/role-map/products/:product_id/price-table/tiers/:tier_id/role-selector
///
/// 204 for bundle products.
pub async fn get_role_selector(
    State(state): State<RoleMapAppState>,
    Path((product_id, tier_id)): Path<(String, String)>,
) -> Result<Response, RoleMapApiError> {
    let product_id: ProductId = parse_path("product_id", &product_id)?;
    let tier_id: PriceTierId = parse_path("tier_id", &tier_id)?;
    let cell = state
        .price_option_role_editor()
        .render_role_selector(product_id, tier_id)
        .await?;
    Ok(json_or_no_content(cell))
}

/// GET /api/role-map/products/:product_id/tiers/:tier_id/role
pub async fn get_tier_role(
    State(state): State<RoleMapAppState>,
    Path((product_id, tier_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let product_id: ProductId = parse_path("product_id", &product_id)?;
    let tier_id: PriceTierId = parse_path("tier_id", &tier_id)?;
    let role = state
        .price_option_role_editor()
        .tier_role(product_id, Some(tier_id))
        .await?;

    Ok(Json(TierRoleResponse {
        product_id,
        tier_id,
        role,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// PUT /api/role-map/roles - Replace the membership-roles setting
pub async fn update_membership_roles(
    State(state): State<RoleMapAppState>,
    _user: AuthenticatedUser, // Would check admin capability in production
    Json(request): Json<UpdateMembershipRolesRequest>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let result = state
        .update_membership_roles_handler()
        .handle(UpdateMembershipRolesCommand {
            selection: request.roles,
        })
        .await?;
    Ok(Json(result))
}

/// POST /api/role-map/validate - Validate the visitor's membership
pub async fn validate_membership(
    State(state): State<RoleMapAppState>,
    OptionalUser(user_id): OptionalUser,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let result = state
        .validate_membership_handler()
        .handle(ValidateMembershipCommand { user_id })
        .await?;
    Ok(Json(result))
}

/// POST /api/role-map/users/:user_id/role - Assign a membership role
pub async fn set_user_role(
    State(state): State<RoleMapAppState>,
    _user: AuthenticatedUser,
    Path(user_id): Path<String>,
    Json(request): Json<SetUserRoleRequest>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let cmd = SetUserRoleCommand {
        user_id: UserId::new(user_id)?,
        role: parse_role(request.role)?,
    };
    let result = state.set_user_role_handler().handle(cmd).await?;
    Ok(Json(result))
}

/// PUT /api/role-map/products/:product_id/tiers/:tier_id/role - Save a tier role
pub async fn update_tier_role(
    State(state): State<RoleMapAppState>,
    _user: AuthenticatedUser,
    Path((product_id, tier_id)): Path<(String, String)>,
    Json(request): Json<UpdateTierRoleRequest>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let cmd = UpdateTierRoleCommand {
        product_id: parse_path("product_id", &product_id)?,
        tier_id: parse_path("tier_id", &tier_id)?,
        role: parse_role(request.role)?,
    };
    let result = state.update_tier_role_handler().handle(cmd).await?;
    Ok(Json(result))
}

/// POST /api/role-map/webhooks/purchase-complete/:payment_id
///
/// Called by the commerce platform once per completed payment.
pub async fn handle_purchase_complete(
    State(state): State<RoleMapAppState>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, RoleMapApiError> {
    let payment_id: PaymentId = parse_path("payment_id", &payment_id)?;
    let result = state
        .complete_purchase_handler()
        .handle(CompletePurchaseCommand { payment_id })
        .await?;
    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Request Parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_path<T: FromStr>(field: &str, raw: &str) -> Result<T, RoleMapApiError> {
    raw.parse().map_err(|_| {
        RoleMapApiError(RoleMapError::validation(
            field,
            format!("'{}' is not a valid id", raw),
        ))
    })
}

/// Blank role values mean "no role".
fn parse_role(raw: Option<String>) -> Result<Option<RoleId>, RoleMapApiError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(RoleId::new(raw)?)),
        _ => Ok(None),
    }
}

fn json_or_no_content<T: Serialize>(cell: Option<T>) -> Response {
    match cell {
        Some(cell) => Json(cell).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts role-map errors to HTTP responses.
#[derive(Debug)]
pub struct RoleMapApiError(pub RoleMapError);

impl From<RoleMapError> for RoleMapApiError {
    fn from(err: RoleMapError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for RoleMapApiError {
    fn from(err: DomainError) -> Self {
        Self(RoleMapError::from(err))
    }
}

impl From<ValidationError> for RoleMapApiError {
    fn from(err: ValidationError) -> Self {
        Self(RoleMapError::from(err))
    }
}

impl IntoResponse for RoleMapApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RoleMapError::NotFound { .. } => StatusCode::NOT_FOUND,
            RoleMapError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            RoleMapError::Infrastructure(msg) => {
                error!("Role-map request failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self.0 {
            RoleMapError::ValidationFailed { field, message } => ErrorResponse::with_details(
                self.0.code().to_string(),
                message.clone(),
                serde_json::json!({ "field": field }),
            ),
            RoleMapError::Infrastructure(_) => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
            other => ErrorResponse::new(other.code().to_string(), other.message()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_resource_code() {
        let response =
            RoleMapApiError(RoleMapError::not_found("product", 12)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_field_detail() {
        let response = parse_path::<ProductId>("product_id", "abc")
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "VALIDATION_FAILED");
        assert_eq!(body["details"]["field"], "product_id");
    }

    #[tokio::test]
    async fn infrastructure_hides_details() {
        let response =
            RoleMapApiError(RoleMapError::infrastructure("pool exhausted")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn blank_role_parses_as_none() {
        assert_eq!(parse_role(Some("  ".to_string())).unwrap(), None);
        assert_eq!(parse_role(None).unwrap(), None);
        assert_eq!(
            parse_role(Some("gold".to_string())).unwrap(),
            Some(RoleId::new("gold").unwrap())
        );
    }

    #[test]
    fn role_with_whitespace_is_rejected() {
        assert!(parse_role(Some("gold member".to_string())).is_err());
    }
}
