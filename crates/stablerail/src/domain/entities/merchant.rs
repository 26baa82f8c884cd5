//! Merchant - owner of payment links and receiver of webhooks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A merchant account
///
/// The webhook endpoint and secret are static fields configured outside
/// of the API; there is no registration or rotation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: Uuid,
    pub name: String,
    /// Key presented in the API key header
    pub api_key: String,
    /// Endpoint that receives signed webhook deliveries
    pub webhook_url: Option<String>,
    /// Dedicated HMAC secret for webhook deliveries
    pub webhook_secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Merchant {
    pub fn new(name: String, api_key: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            api_key,
            webhook_url: None,
            webhook_secret: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_webhook_url(mut self, url: String) -> Self {
        self.webhook_url = Some(url);
        self
    }

    pub fn with_webhook_secret(mut self, secret: String) -> Self {
        self.webhook_secret = Some(secret);
        self
    }

    /// Secret used to sign deliveries to this merchant.
    ///
    /// Falls back to the API key when no dedicated secret is configured.
    pub fn webhook_signing_secret(&self) -> &str {
        self.webhook_secret.as_deref().unwrap_or(&self.api_key)
    }

    /// Configured, non-blank webhook endpoint
    pub fn webhook_endpoint(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
