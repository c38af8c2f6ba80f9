//! Payment records port.

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::role_map::{CartDetails, PaymentUserInfo};
use async_trait::async_trait;

/// Read-only access to completed payments.
#[async_trait]
pub trait PaymentRecords: Send + Sync {
    /// Buyer details stored on the payment.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the host has no such payment
    async fn payment_user_info(&self, payment_id: PaymentId) -> Result<PaymentUserInfo, DomainError>;

    /// Cart lines stored on the payment.
    ///
    /// Returns `CartDetails::Invalid` when the stored value is not a list.
    async fn cart_details(&self, payment_id: PaymentId) -> Result<CartDetails, DomainError>;
}
