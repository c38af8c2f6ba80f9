//! Payment records as read at purchase completion.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PriceTierId, ProductId, UserId};

/// Buyer details attached to a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUserInfo {
    /// Missing for guest checkouts.
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One purchased cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Price tier bought, absent for single-price products.
    #[serde(default)]
    pub price_tier_id: Option<PriceTierId>,
}

fn default_quantity() -> u32 {
    1
}

impl CartLineItem {
    pub fn new(product_id: ProductId, price_tier_id: Option<PriceTierId>) -> Self {
        Self {
            product_id,
            name: String::new(),
            quantity: 1,
            price_tier_id,
        }
    }

    /// The price tier this line was bought at.
    pub fn price_tier_id(&self) -> Option<PriceTierId> {
        self.price_tier_id
    }
}

/// Cart details stored on a payment.
///
/// `Invalid` covers anything the store returns that is not a list of
/// line items (missing meta, corrupted serialization).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartDetails {
    Items(Vec<CartLineItem>),
    Invalid,
}

impl CartDetails {
    pub fn items(&self) -> Option<&[CartLineItem]> {
        match self {
            CartDetails::Items(items) => Some(items),
            CartDetails::Invalid => None,
        }
    }
}
