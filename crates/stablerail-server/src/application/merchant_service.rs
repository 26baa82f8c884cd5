//! Merchant Application Service (Use Case)

use std::sync::Arc;

use stablerail::{DomainError, Merchant, MerchantRepository};

use crate::config::DemoMerchantConfig;

/// Application service for Merchant operations
pub struct MerchantService {
    repo: Arc<dyn MerchantRepository>,
}

impl MerchantService {
    pub fn new(repo: Arc<dyn MerchantRepository>) -> Self {
        Self { repo }
    }

    /// Resolve the merchant owning `api_key`
    pub async fn authenticate(&self, api_key: &str) -> Result<Option<Merchant>, DomainError> {
        self.repo.find_by_api_key(api_key).await
    }

    /// Upsert the configured demo merchant
    pub async fn ensure_demo_merchant(
        &self,
        demo: &DemoMerchantConfig,
    ) -> Result<Merchant, DomainError> {
        let mut merchant = Merchant::new(demo.name.clone(), demo.api_key.clone());
        merchant.webhook_url = demo.webhook_url.clone();
        merchant.webhook_secret = demo.webhook_secret.clone();

        let saved = self.repo.save(&merchant).await?;
        tracing::info!("Seeded merchant: {} ({})", saved.name, saved.id);
        Ok(saved)
    }
}
