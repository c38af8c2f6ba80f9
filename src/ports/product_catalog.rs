//! Product catalog port.
//!
//! Product data as stored by the host commerce platform. Meta-style reads
//! (`membership_length_enabled`, `price_tiers`) treat an unknown product
//! like one with no meta: `false` and an empty list.

use crate::domain::foundation::{DomainError, PriceTierId, ProductId, RoleId};
use crate::domain::role_map::{PriceTier, ProductType};
use async_trait::async_trait;

/// Port for product type, product meta and price tiers.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Type of the product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the host has no such product
    async fn product_type(&self, product_id: ProductId) -> Result<ProductType, DomainError>;

    /// Whether the "membership length" option is switched on for the product.
    async fn membership_length_enabled(&self, product_id: ProductId) -> Result<bool, DomainError>;

    /// Price tiers of the product, in display order.
    async fn price_tiers(&self, product_id: ProductId) -> Result<Vec<PriceTier>, DomainError>;

    /// Store or clear the role attached to one price tier.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` / `PriceTierNotFound` for unknown ids
    async fn set_price_tier_role(
        &self,
        product_id: ProductId,
        tier_id: PriceTierId,
        role: Option<&RoleId>,
    ) -> Result<(), DomainError>;
}
