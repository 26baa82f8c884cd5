//! PaymentLink Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::PaymentLink;
use crate::domain::errors::DomainError;

/// Repository interface for PaymentLink entities
#[async_trait]
pub trait PaymentLinkRepository: Send + Sync {
    /// Find a link by ID regardless of owner
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError>;

    /// Find a link by ID only if it belongs to the merchant
    async fn find_for_merchant(
        &self,
        id: Uuid,
        merchant_id: Uuid,
    ) -> Result<Option<PaymentLink>, DomainError>;

    /// All links of a merchant, newest first
    async fn list_by_merchant(&self, merchant_id: Uuid) -> Result<Vec<PaymentLink>, DomainError>;

    /// Insert a new link
    async fn create(&self, link: &PaymentLink) -> Result<PaymentLink, DomainError>;

    /// Transition a link to `paid`
    ///
    /// Returns `None` if the link does not exist or was already paid.
    async fn mark_paid(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError>;
}
