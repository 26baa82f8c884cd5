//! PaymentLink Application Service (Use Case)
//!
//! Orchestrates payment link operations and notifies merchants when a link
//! is paid.

use std::sync::Arc;
use uuid::Uuid;

use stablerail::{
    DomainError, MerchantRepository, PaymentCompletedData, PaymentLink, PaymentLinkRepository,
    PaymentLinkStatus, WebhookDispatcher, WebhookEvent, WebhookTransport,
};

/// Application service for PaymentLink operations
pub struct PaymentLinkService {
    links: Arc<dyn PaymentLinkRepository>,
    merchants: Arc<dyn MerchantRepository>,
    webhooks: WebhookDispatcher<dyn WebhookTransport>,
}

impl PaymentLinkService {
    pub fn new(
        links: Arc<dyn PaymentLinkRepository>,
        merchants: Arc<dyn MerchantRepository>,
        webhooks: WebhookDispatcher<dyn WebhookTransport>,
    ) -> Self {
        Self {
            links,
            merchants,
            webhooks,
        }
    }

    /// Create a pending link for a merchant
    pub async fn create(
        &self,
        merchant_id: Uuid,
        amount: String,
        currency: Option<String>,
        description: Option<String>,
    ) -> Result<PaymentLink, DomainError> {
        let link = PaymentLink::new(merchant_id, amount, currency, description)?;
        let saved = self.links.create(&link).await?;

        tracing::info!(
            "Created payment link: {} ({} {})",
            saved.id,
            saved.amount,
            saved.currency
        );

        Ok(saved)
    }

    /// All links of a merchant, newest first
    pub async fn list(&self, merchant_id: Uuid) -> Result<Vec<PaymentLink>, DomainError> {
        self.links.list_by_merchant(merchant_id).await
    }

    /// A link owned by the merchant
    pub async fn get_for_merchant(
        &self,
        id: Uuid,
        merchant_id: Uuid,
    ) -> Result<PaymentLink, DomainError> {
        self.links
            .find_for_merchant(id, merchant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment link", id))
    }

    /// A link as shown on the public checkout page
    pub async fn get_public(&self, id: Uuid) -> Result<PaymentLink, DomainError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment link", id))
    }

    /// Mark a link as paid and notify the merchant.
    ///
    /// The webhook is sent in the background; this returns as soon as the
    /// link is updated.
    pub async fn simulate_payment(&self, id: Uuid) -> Result<PaymentLink, DomainError> {
        let link = self.get_public(id).await?;

        match link.status {
            PaymentLinkStatus::Paid => {
                return Err(DomainError::Conflict("Payment already completed".to_string()))
            }
            PaymentLinkStatus::Expired => {
                return Err(DomainError::Conflict("Payment link has expired".to_string()))
            }
            PaymentLinkStatus::Pending => {}
        }

        // A concurrent payer may have won between the read and the update
        let paid = self
            .links
            .mark_paid(id)
            .await?
            .ok_or_else(|| DomainError::Conflict("Payment already completed".to_string()))?;

        tracing::info!("Payment link paid: {}", paid.id);
        self.notify_payment_completed(&paid).await;

        Ok(paid)
    }

    async fn notify_payment_completed(&self, link: &PaymentLink) {
        let merchant = match self.merchants.find_by_id(link.merchant_id).await {
            Ok(Some(merchant)) => merchant,
            Ok(None) => {
                tracing::warn!(
                    "Merchant {} not found, skipping webhook for {}",
                    link.merchant_id,
                    link.id
                );
                return;
            }
            Err(e) => {
                tracing::error!("Failed to load merchant for webhook: {}", e);
                return;
            }
        };

        let Some(url) = merchant.webhook_endpoint() else {
            tracing::debug!("Merchant {} has no webhook URL configured", merchant.id);
            return;
        };

        let event = WebhookEvent::PaymentCompleted(PaymentCompletedData {
            payment_link_id: link.id.to_string(),
            amount: link.amount.clone(),
            currency: link.currency.clone(),
            status: link.status.to_string(),
        });

        self.webhooks
            .send_webhook(url, event, merchant.webhook_signing_secret());
    }
}
