//! Products and their price tiers as seen by role mapping.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PriceTierId, RoleId};

/// Product type as reported by the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Default,
    /// A product composed of other products. Bundles carry no tier roles.
    Bundle,
}

impl ProductType {
    pub fn is_bundle(&self) -> bool {
        matches!(self, ProductType::Bundle)
    }
}

/// One priced variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub id: PriceTierId,
    pub name: String,
    /// Price in minor currency units.
    pub amount_cents: i64,
    /// Role granted when this tier is purchased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleId>,
}

impl PriceTier {
    pub fn new(id: PriceTierId, name: impl Into<String>, amount_cents: i64) -> Self {
        Self {
            id,
            name: name.into(),
            amount_cents,
            role: None,
        }
    }

    pub fn with_role(mut self, role: RoleId) -> Self {
        self.role = Some(role);
        self
    }
}

/// Role stored on the tier with the given id, if any.
///
/// A missing tier id (a cart item bought without a tier) never matches.
pub fn tier_role(tiers: &[PriceTier], tier_id: Option<PriceTierId>) -> Option<RoleId> {
    let tier_id = tier_id?;
    tiers
        .iter()
        .find(|tier| tier.id == tier_id)
        .and_then(|tier| tier.role.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<PriceTier> {
        vec![
            PriceTier::new(PriceTierId::new(1), "Gold", 5000).with_role(RoleId::new("gold").unwrap()),
            PriceTier::new(PriceTierId::new(2), "Basic", 1000),
        ]
    }

    #[test]
    fn tier_role_returns_stored_role() {
        assert_eq!(
            tier_role(&tiers(), Some(PriceTierId::new(1))),
            Some(RoleId::new("gold").unwrap())
        );
    }

    #[test]
    fn tier_role_is_none_without_stored_role() {
        assert_eq!(tier_role(&tiers(), Some(PriceTierId::new(2))), None);
    }

    #[test]
    fn tier_role_is_none_for_unknown_or_missing_tier() {
        assert_eq!(tier_role(&tiers(), Some(PriceTierId::new(9))), None);
        assert_eq!(tier_role(&tiers(), None), None);
    }

    #[test]
    fn product_type_deserializes_snake_case() {
        let bundle: ProductType = serde_json::from_str("\"bundle\"").unwrap();
        assert!(bundle.is_bundle());
        assert!(!ProductType::default().is_bundle());
    }
}
