//! PriceOptionRoleEditor - Role column of the product price-tier admin table.

use std::sync::Arc;

use tracing::debug;

use super::MembershipRoleRegistry;
use crate::domain::foundation::{PriceTierId, ProductId, RoleId};
use crate::domain::role_map::{
    tier_role, PriceTableHeaderCell, RoleMapError, RoleSelectorCell,
};
use crate::ports::ProductCatalog;

/// Query handler producing the role column cells and reading tier roles.
///
/// Bundle products get no role column at all: both render calls return
/// `None` for them.
pub struct PriceOptionRoleEditor {
    registry: Arc<MembershipRoleRegistry>,
    products: Arc<dyn ProductCatalog>,
}

impl PriceOptionRoleEditor {
    pub fn new(registry: Arc<MembershipRoleRegistry>, products: Arc<dyn ProductCatalog>) -> Self {
        Self { registry, products }
    }

    /// Header cell for the role column.
    pub async fn render_header(
        &self,
        product_id: ProductId,
    ) -> Result<Option<PriceTableHeaderCell>, RoleMapError> {
        if self.is_bundle(product_id).await? {
            return Ok(None);
        }

        let hidden = !self.products.membership_length_enabled(product_id).await?;
        Ok(Some(PriceTableHeaderCell::new(hidden)))
    }

    /// Role selector cell for one price tier row.
    pub async fn render_role_selector(
        &self,
        product_id: ProductId,
        tier_id: PriceTierId,
    ) -> Result<Option<RoleSelectorCell>, RoleMapError> {
        if self.is_bundle(product_id).await? {
            return Ok(None);
        }

        let current = self.tier_role(product_id, Some(tier_id)).await?;
        let hidden = !self.products.membership_length_enabled(product_id).await?;
        let names = self.registry.membership_role_names().await?;

        Ok(Some(RoleSelectorCell::build(
            tier_id,
            &names,
            current.as_ref(),
            hidden,
        )))
    }

    /// Role stored on a price tier; `None` if unset or the tier is unknown.
    pub async fn tier_role(
        &self,
        product_id: ProductId,
        tier_id: Option<PriceTierId>,
    ) -> Result<Option<RoleId>, RoleMapError> {
        let tiers = self.products.price_tiers(product_id).await?;
        Ok(tier_role(&tiers, tier_id))
    }

    async fn is_bundle(&self, product_id: ProductId) -> Result<bool, RoleMapError> {
        let bundle = self.products.product_type(product_id).await?.is_bundle();
        if bundle {
            debug!(product_id = %product_id, "Bundle product has no tier roles");
        }
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::platform::{InMemoryPlatform, ProductRecord};
    use crate::domain::role_map::{MulticheckSelection, PriceTier, ProductType, TOGGLED_HIDE_CLASS};

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    const MEMBERSHIP: ProductId = ProductId::new(10);
    const PLAIN: ProductId = ProductId::new(11);
    const BUNDLE: ProductId = ProductId::new(12);

    fn tiers() -> Vec<PriceTier> {
        vec![
            PriceTier::new(PriceTierId::new(1), "Gold", 5000).with_role(role("gold")),
            PriceTier::new(PriceTierId::new(2), "Silver", 2500),
        ]
    }

    fn editor() -> PriceOptionRoleEditor {
        let platform = Arc::new(
            InMemoryPlatform::builder()
                .default_role(role("subscriber"))
                .role(role("gold"), "Gold")
                .role(role("silver"), "Silver")
                .membership_roles(MulticheckSelection::enabled([role("gold"), role("silver")]))
                .product(
                    MEMBERSHIP,
                    ProductRecord {
                        product_type: ProductType::Default,
                        membership_length_enabled: true,
                        tiers: tiers(),
                    },
                )
                .product(
                    PLAIN,
                    ProductRecord {
                        tiers: tiers(),
                        ..Default::default()
                    },
                )
                .product(
                    BUNDLE,
                    ProductRecord {
                        product_type: ProductType::Bundle,
                        membership_length_enabled: true,
                        tiers: tiers(),
                    },
                )
                .build(),
        );
        let registry = Arc::new(MembershipRoleRegistry::new(platform.clone(), platform.clone()));
        PriceOptionRoleEditor::new(registry, platform)
    }

    #[tokio::test]
    async fn header_is_visible_for_membership_products() {
        let header = editor().render_header(MEMBERSHIP).await.unwrap().unwrap();
        assert!(!header.hidden);
        assert_eq!(header.css_class, TOGGLED_HIDE_CLASS);
    }

    #[tokio::test]
    async fn header_is_hidden_without_membership_length() {
        let header = editor().render_header(PLAIN).await.unwrap().unwrap();
        assert!(header.hidden);
    }

    #[tokio::test]
    async fn bundle_products_render_nothing() {
        let editor = editor();
        assert!(editor.render_header(BUNDLE).await.unwrap().is_none());
        assert!(editor
            .render_role_selector(BUNDLE, PriceTierId::new(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn selector_preselects_stored_role() {
        let cell = editor()
            .render_role_selector(MEMBERSHIP, PriceTierId::new(1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cell.field_name, "price_tiers[1][role]");
        assert_eq!(cell.options.len(), 2);
        assert_eq!(cell.selected().map(|o| o.value.clone()), Some(role("gold")));
        assert!(!cell.hidden);
    }

    #[tokio::test]
    async fn selector_for_tier_without_role_selects_nothing() {
        let cell = editor()
            .render_role_selector(PLAIN, PriceTierId::new(2))
            .await
            .unwrap()
            .unwrap();

        assert!(cell.selected().is_none());
        assert!(cell.hidden);
    }

    #[tokio::test]
    async fn tier_role_lookup() {
        let editor = editor();
        assert_eq!(
            editor.tier_role(MEMBERSHIP, Some(PriceTierId::new(1))).await.unwrap(),
            Some(role("gold"))
        );
        assert_eq!(
            editor.tier_role(MEMBERSHIP, Some(PriceTierId::new(2))).await.unwrap(),
            None
        );
        assert_eq!(
            editor.tier_role(MEMBERSHIP, Some(PriceTierId::new(99))).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_for_rendering() {
        let result = editor().render_header(ProductId::new(404)).await;
        assert!(matches!(result, Err(RoleMapError::NotFound { .. })));
    }
}
