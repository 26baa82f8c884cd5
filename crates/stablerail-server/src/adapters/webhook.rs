//! HTTP Webhook Transport
//!
//! Performs single webhook delivery attempts with reqwest. Retry scheduling
//! is handled by `stablerail::WebhookDispatcher`.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use stablerail::{
    AttemptOutcome, DomainError, SignedDelivery, WebhookDeliveryConfig, WebhookTransport,
    DELIVERY_ID_HEADER, SIGNATURE_HEADER,
};

/// reqwest implementation of WebhookTransport
pub struct HttpWebhookTransport {
    client: Client,
}

impl HttpWebhookTransport {
    pub fn with_config(config: &WebhookDeliveryConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn attempt(&self, delivery: &SignedDelivery) -> AttemptOutcome {
        let response = self
            .client
            .post(&delivery.url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, delivery.signature_header())
            .header(DELIVERY_ID_HEADER, delivery.delivery_id.to_string())
            .body(delivery.body.clone())
            .send()
            .await;

        // the dispatcher logs failures with the error detail
        match response {
            Ok(resp) => AttemptOutcome::from_status(resp.status().as_u16()),
            Err(e) => AttemptOutcome::TransportError(e.to_string()),
        }
    }
}
