//! Merchant Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Merchant;
use crate::domain::errors::DomainError;

/// Repository interface for Merchant entities
#[async_trait]
pub trait MerchantRepository: Send + Sync {
    /// Find a merchant by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Merchant>, DomainError>;

    /// Find the merchant owning an API key
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, DomainError>;

    /// Insert a merchant, or update name and webhook settings when the
    /// API key already exists
    async fn save(&self, merchant: &Merchant) -> Result<Merchant, DomainError>;
}
