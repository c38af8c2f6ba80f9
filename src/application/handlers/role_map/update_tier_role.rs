//! UpdateTierRoleHandler - Command handler saving the role chosen for a
//! price tier in the product admin.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::MembershipRoleRegistry;
use crate::domain::foundation::{PriceTierId, ProductId, RoleId};
use crate::domain::role_map::RoleMapError;
use crate::ports::ProductCatalog;

/// Command to store (or clear, with `None`) a tier's role.
#[derive(Debug, Clone)]
pub struct UpdateTierRoleCommand {
    pub product_id: ProductId,
    pub tier_id: PriceTierId,
    pub role: Option<RoleId>,
}

/// Result of saving a tier role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateTierRoleResult {
    Saved { role: Option<RoleId> },
    /// Bundles carry no tier roles.
    BundleProduct,
    /// The role is not an allowed membership role.
    RoleNotAllowed { role: RoleId },
    /// The product has no tier with this id.
    UnknownTier,
}

/// Handler for tier role saves.
pub struct UpdateTierRoleHandler {
    registry: Arc<MembershipRoleRegistry>,
    products: Arc<dyn ProductCatalog>,
}

impl UpdateTierRoleHandler {
    pub fn new(registry: Arc<MembershipRoleRegistry>, products: Arc<dyn ProductCatalog>) -> Self {
        Self { registry, products }
    }

    pub async fn handle(
        &self,
        cmd: UpdateTierRoleCommand,
    ) -> Result<UpdateTierRoleResult, RoleMapError> {
        if self.products.product_type(cmd.product_id).await?.is_bundle() {
            return Ok(UpdateTierRoleResult::BundleProduct);
        }

        let tiers = self.products.price_tiers(cmd.product_id).await?;
        if !tiers.iter().any(|tier| tier.id == cmd.tier_id) {
            return Ok(UpdateTierRoleResult::UnknownTier);
        }

        if let Some(role) = &cmd.role {
            let allowed = self.registry.membership_role_names().await?;
            if !allowed.contains(role) {
                warn!(
                    product_id = %cmd.product_id,
                    tier_id = %cmd.tier_id,
                    role = %role,
                    "Refusing to store role outside membership roles"
                );
                return Ok(UpdateTierRoleResult::RoleNotAllowed { role: role.clone() });
            }
        }

        self.products
            .set_price_tier_role(cmd.product_id, cmd.tier_id, cmd.role.as_ref())
            .await?;

        info!(
            product_id = %cmd.product_id,
            tier_id = %cmd.tier_id,
            role = ?cmd.role,
            "Price tier role saved"
        );

        Ok(UpdateTierRoleResult::Saved { role: cmd.role })
    }
}
