//! CompletePurchaseHandler - Maps a completed payment to a membership role.
//!
//! Triggered once per completed purchase. The role of the first membership
//! line item in cart order wins; there is no price comparison between
//! several membership items bought together.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{SetUserRoleCommand, SetUserRoleHandler, SetUserRoleResult};
use crate::domain::foundation::{PaymentId, RoleId};
use crate::domain::role_map::{tier_role, RoleMapError};
use crate::ports::{PaymentRecords, ProductCatalog};

/// Command carrying the completed payment.
#[derive(Debug, Clone)]
pub struct CompletePurchaseCommand {
    pub payment_id: PaymentId,
}

/// Result of purchase completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletePurchaseResult {
    /// Role assignment ran for the first membership item.
    RoleApplied { assignment: SetUserRoleResult },
    /// The payment has no registered buyer.
    NoUser,
    /// Cart details were not a list of line items.
    InvalidCart,
    /// No line item belongs to a membership product.
    NoMembershipItems,
}

/// Handler for completed purchases.
pub struct CompletePurchaseHandler {
    payments: Arc<dyn PaymentRecords>,
    products: Arc<dyn ProductCatalog>,
    set_user_role: Arc<SetUserRoleHandler>,
}

impl CompletePurchaseHandler {
    pub fn new(
        payments: Arc<dyn PaymentRecords>,
        products: Arc<dyn ProductCatalog>,
        set_user_role: Arc<SetUserRoleHandler>,
    ) -> Self {
        Self {
            payments,
            products,
            set_user_role,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompletePurchaseCommand,
    ) -> Result<CompletePurchaseResult, RoleMapError> {
        let payment_id = cmd.payment_id;

        // 1. Resolve the buyer
        let user_info = self.payments.payment_user_info(payment_id).await?;
        let Some(user_id) = user_info.user_id else {
            debug!(payment_id = %payment_id, "Payment has no registered user, skipping");
            return Ok(CompletePurchaseResult::NoUser);
        };

        // 2. Cart details must be a list
        let cart = self.payments.cart_details(payment_id).await?;
        let Some(items) = cart.items() else {
            warn!(payment_id = %payment_id, "Cart details are not a list, skipping");
            return Ok(CompletePurchaseResult::InvalidCart);
        };

        // 3. Collect tier roles of membership line items in cart order
        let mut roles: Vec<Option<RoleId>> = Vec::new();
        for item in items {
            if !self
                .products
                .membership_length_enabled(item.product_id)
                .await?
            {
                continue;
            }
            let tiers = self.products.price_tiers(item.product_id).await?;
            roles.push(tier_role(&tiers, item.price_tier_id()));
        }

        // 4. First membership item wins
        let Some(role) = roles.into_iter().next() else {
            debug!(payment_id = %payment_id, "No membership items in cart");
            return Ok(CompletePurchaseResult::NoMembershipItems);
        };

        let assignment = self
            .set_user_role
            .handle(SetUserRoleCommand {
                user_id: user_id.clone(),
                role,
            })
            .await?;

        info!(
            payment_id = %payment_id,
            user_id = %user_id,
            "Purchase mapped to membership role"
        );

        Ok(CompletePurchaseResult::RoleApplied { assignment })
    }
}
