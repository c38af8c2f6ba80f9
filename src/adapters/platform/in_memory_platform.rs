//! In-memory host platform.
//!
//! Implements every platform and commerce port over plain collections. Used
//! by the development binary and by tests; production deployments replace
//! it with adapters talking to the real host store.
//!
//! # Usage
//!
//! ```ignore
//! use role_map::adapters::platform::{InMemoryPlatform, MembershipTerm};
//!
//! let platform = InMemoryPlatform::builder()
//!     .default_role(RoleId::new("subscriber")?)
//!     .role(RoleId::new("gold")?, "Gold")
//!     .user(user_id.clone(), [RoleId::new("subscriber")?])
//!     .membership(user_id, MembershipTerm::Lifetime)
//!     .build();
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{
    DomainError, ErrorCode, PaymentId, PriceTierId, ProductId, RoleId, UserId,
};
use crate::domain::role_map::{
    CartDetails, MulticheckSelection, NamedRole, PaymentUserInfo, PriceTier, ProductType,
    RoleCatalog, RoleChange,
};
use crate::ports::{
    MembershipValidity, PaymentRecords, ProductCatalog, RoleCatalogProvider, SettingsStore,
    UserRoleStore,
};

/// How long a user's membership lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipTerm {
    Lifetime,
    ExpiresAt(DateTime<Utc>),
}

impl MembershipTerm {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            MembershipTerm::Lifetime => true,
            MembershipTerm::ExpiresAt(expires_at) => now < *expires_at,
        }
    }
}

/// Stored product data.
#[derive(Debug, Clone, Default)]
pub struct ProductRecord {
    pub product_type: ProductType,
    pub membership_length_enabled: bool,
    pub tiers: Vec<PriceTier>,
}

/// Stored payment data.
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub user_info: PaymentUserInfo,
    pub cart: CartDetails,
}

/// A recorded call to `add_role` / `remove_role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMutationCall {
    pub user_id: UserId,
    pub change: RoleChange,
}

#[derive(Debug, Default)]
struct PlatformState {
    membership_roles: Option<MulticheckSelection>,
    default_role: Option<RoleId>,
    catalog: Vec<NamedRole>,
    users: HashMap<UserId, Vec<RoleId>>,
    memberships: HashMap<UserId, MembershipTerm>,
    products: HashMap<ProductId, ProductRecord>,
    payments: HashMap<PaymentId, PaymentRecord>,
    record_mutations: bool,
    mutations: Vec<RoleMutationCall>,
}

impl PlatformState {
    fn record(&mut self, user_id: &UserId, change: RoleChange) {
        if self.record_mutations {
            self.mutations.push(RoleMutationCall {
                user_id: user_id.clone(),
                change,
            });
        }
    }
}

/// In-memory implementation of every host platform port.
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: RwLock<PlatformState>,
}

/// Builder for [`InMemoryPlatform`].
#[derive(Debug, Default)]
pub struct InMemoryPlatformBuilder {
    state: PlatformState,
}

impl InMemoryPlatformBuilder {
    pub fn default_role(mut self, role: RoleId) -> Self {
        self.state.default_role = Some(role);
        self
    }

    /// Adds a catalog role.
    pub fn role(mut self, id: RoleId, name: impl Into<String>) -> Self {
        self.state.catalog.push(NamedRole::new(id, name));
        self
    }

    pub fn membership_roles(mut self, selection: MulticheckSelection) -> Self {
        self.state.membership_roles = Some(selection);
        self
    }

    pub fn user<I>(mut self, user_id: UserId, roles: I) -> Self
    where
        I: IntoIterator<Item = RoleId>,
    {
        self.state.users.insert(user_id, roles.into_iter().collect());
        self
    }

    pub fn membership(mut self, user_id: UserId, term: MembershipTerm) -> Self {
        self.state.memberships.insert(user_id, term);
        self
    }

    pub fn product(mut self, product_id: ProductId, record: ProductRecord) -> Self {
        self.state.products.insert(product_id, record);
        self
    }

    pub fn payment(mut self, payment_id: PaymentId, record: PaymentRecord) -> Self {
        self.state.payments.insert(payment_id, record);
        self
    }

    /// Keeps a log of add/remove calls for [`InMemoryPlatform::mutation_calls`].
    /// Off by default; the log is unbounded.
    pub fn record_mutations(mut self) -> Self {
        self.state.record_mutations = true;
        self
    }

    pub fn build(self) -> InMemoryPlatform {
        InMemoryPlatform {
            state: RwLock::new(self.state),
        }
    }
}

impl InMemoryPlatform {
    pub fn builder() -> InMemoryPlatformBuilder {
        InMemoryPlatformBuilder::default()
    }

    // A panic while holding the lock leaves plain collections behind, which
    // are still consistent enough to keep serving.
    fn read(&self) -> RwLockReadGuard<'_, PlatformState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlatformState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current roles of a user, `None` for unknown users.
    pub fn user_roles(&self, user_id: &UserId) -> Option<Vec<RoleId>> {
        self.read().users.get(user_id).cloned()
    }

    /// Every add/remove call received so far, in order. Empty unless the
    /// platform was built with `record_mutations`.
    pub fn mutation_calls(&self) -> Vec<RoleMutationCall> {
        self.read().mutations.clone()
    }

    pub fn set_membership(&self, user_id: UserId, term: MembershipTerm) {
        self.write().memberships.insert(user_id, term);
    }

    pub fn upsert_payment(&self, payment_id: PaymentId, record: PaymentRecord) {
        self.write().payments.insert(payment_id, record);
    }
}

fn not_found(code: ErrorCode, what: &str, id: impl ToString) -> DomainError {
    let id = id.to_string();
    DomainError::new(code, format!("{} {} not found", what, id)).with_detail("id", id)
}

#[async_trait]
impl SettingsStore for InMemoryPlatform {
    async fn membership_roles_setting(&self) -> Result<Option<MulticheckSelection>, DomainError> {
        Ok(self.read().membership_roles.clone())
    }

    async fn save_membership_roles_setting(
        &self,
        selection: &MulticheckSelection,
    ) -> Result<(), DomainError> {
        self.write().membership_roles = Some(selection.clone());
        Ok(())
    }

    async fn default_role(&self) -> Result<RoleId, DomainError> {
        self.read().default_role.clone().ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "No default role configured")
        })
    }
}

#[async_trait]
impl RoleCatalogProvider for InMemoryPlatform {
    async fn role_catalog(&self) -> Result<RoleCatalog, DomainError> {
        Ok(RoleCatalog::new(self.read().catalog.clone()))
    }
}

#[async_trait]
impl UserRoleStore for InMemoryPlatform {
    async fn roles_of(&self, user_id: &UserId) -> Result<Vec<RoleId>, DomainError> {
        self.read()
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User", user_id))
    }

    async fn add_role(&self, user_id: &UserId, role: &RoleId) -> Result<(), DomainError> {
        let mut state = self.write();
        let roles = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User", user_id))?;
        if !roles.contains(role) {
            roles.push(role.clone());
        }
        state.record(user_id, RoleChange::Add(role.clone()));
        Ok(())
    }

    async fn remove_role(&self, user_id: &UserId, role: &RoleId) -> Result<(), DomainError> {
        let mut state = self.write();
        let roles = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User", user_id))?;
        roles.retain(|r| r != role);
        state.record(user_id, RoleChange::Remove(role.clone()));
        Ok(())
    }
}

#[async_trait]
impl MembershipValidity for InMemoryPlatform {
    async fn is_membership_valid(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let now = Utc::now();
        Ok(self
            .read()
            .memberships
            .get(user_id)
            .is_some_and(|term| term.is_valid_at(now)))
    }
}

#[async_trait]
impl ProductCatalog for InMemoryPlatform {
    async fn product_type(&self, product_id: ProductId) -> Result<ProductType, DomainError> {
        self.read()
            .products
            .get(&product_id)
            .map(|p| p.product_type)
            .ok_or_else(|| not_found(ErrorCode::ProductNotFound, "Product", product_id))
    }

    async fn membership_length_enabled(&self, product_id: ProductId) -> Result<bool, DomainError> {
        Ok(self
            .read()
            .products
            .get(&product_id)
            .is_some_and(|p| p.membership_length_enabled))
    }

    async fn price_tiers(&self, product_id: ProductId) -> Result<Vec<PriceTier>, DomainError> {
        Ok(self
            .read()
            .products
            .get(&product_id)
            .map(|p| p.tiers.clone())
            .unwrap_or_default())
    }

    async fn set_price_tier_role(
        &self,
        product_id: ProductId,
        tier_id: PriceTierId,
        role: Option<&RoleId>,
    ) -> Result<(), DomainError> {
        let mut state = self.write();
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or_else(|| not_found(ErrorCode::ProductNotFound, "Product", product_id))?;
        let tier = product
            .tiers
            .iter_mut()
            .find(|t| t.id == tier_id)
            .ok_or_else(|| not_found(ErrorCode::PriceTierNotFound, "Price tier", tier_id))?;
        tier.role = role.cloned();
        Ok(())
    }
}

#[async_trait]
impl PaymentRecords for InMemoryPlatform {
    async fn payment_user_info(&self, payment_id: PaymentId) -> Result<PaymentUserInfo, DomainError> {
        self.read()
            .payments
            .get(&payment_id)
            .map(|p| p.user_info.clone())
            .ok_or_else(|| not_found(ErrorCode::PaymentNotFound, "Payment", payment_id))
    }

    async fn cart_details(&self, payment_id: PaymentId) -> Result<CartDetails, DomainError> {
        self.read()
            .payments
            .get(&payment_id)
            .map(|p| p.cart.clone())
            .ok_or_else(|| not_found(ErrorCode::PaymentNotFound, "Payment", payment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn add_and_remove_are_idempotent_and_recorded() {
        let platform = InMemoryPlatform::builder()
            .record_mutations()
            .user(user("u1"), [role("subscriber")])
            .build();

        platform.add_role(&user("u1"), &role("gold")).await.unwrap();
        platform.add_role(&user("u1"), &role("gold")).await.unwrap();
        platform.remove_role(&user("u1"), &role("editor")).await.unwrap();

        assert_eq!(
            platform.user_roles(&user("u1")),
            Some(vec![role("subscriber"), role("gold")])
        );
        assert_eq!(platform.mutation_calls().len(), 3);
    }

    #[tokio::test]
    async fn mutations_are_not_logged_by_default() {
        let platform = InMemoryPlatform::builder()
            .user(user("u1"), [role("subscriber")])
            .build();

        platform.add_role(&user("u1"), &role("gold")).await.unwrap();
        platform.remove_role(&user("u1"), &role("subscriber")).await.unwrap();

        assert_eq!(platform.user_roles(&user("u1")), Some(vec![role("gold")]));
        assert!(platform.mutation_calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let platform = InMemoryPlatform::builder().build();
        let err = platform.roles_of(&user("ghost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
        assert_eq!(err.details.get("id"), Some(&"ghost".to_string()));
    }

    #[tokio::test]
    async fn membership_validity_follows_term() {
        let platform = InMemoryPlatform::builder()
            .membership(user("life"), MembershipTerm::Lifetime)
            .membership(
                user("lapsed"),
                MembershipTerm::ExpiresAt(Utc::now() - Duration::days(1)),
            )
            .build();

        assert!(platform.is_membership_valid(&user("life")).await.unwrap());
        assert!(!platform.is_membership_valid(&user("lapsed")).await.unwrap());
        assert!(!platform.is_membership_valid(&user("nobody")).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_product_reads_like_missing_meta() {
        let platform = InMemoryPlatform::builder().build();
        let product = ProductId::new(5);

        assert!(!platform.membership_length_enabled(product).await.unwrap());
        assert!(platform.price_tiers(product).await.unwrap().is_empty());
        assert_eq!(
            platform.product_type(product).await.unwrap_err().code,
            ErrorCode::ProductNotFound
        );
    }

    #[tokio::test]
    async fn set_price_tier_role_updates_tier() {
        let product = ProductId::new(1);
        let platform = InMemoryPlatform::builder()
            .product(
                product,
                ProductRecord {
                    tiers: vec![PriceTier::new(PriceTierId::new(1), "Gold", 5000)],
                    ..Default::default()
                },
            )
            .build();

        platform
            .set_price_tier_role(product, PriceTierId::new(1), Some(&role("gold")))
            .await
            .unwrap();

        let tiers = platform.price_tiers(product).await.unwrap();
        assert_eq!(tiers[0].role, Some(role("gold")));

        let err = platform
            .set_price_tier_role(product, PriceTierId::new(2), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PriceTierNotFound);
    }

    #[tokio::test]
    async fn missing_default_role_is_an_error() {
        let platform = InMemoryPlatform::builder().build();
        assert!(platform.default_role().await.is_err());
    }
}
