//! Merchant Webhooks
//!
//! Events the platform reports to merchants and the envelope they are
//! delivered in. The envelope is serialized once per logical send; every
//! retry of that send transmits the same bytes under the same signature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying `sha256=<hex>` over the raw request body
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";
/// Header carrying the delivery identifier, stable across retries
pub const DELIVERY_ID_HEADER: &str = "x-webhook-id";
/// Scheme prefix of the signature header value
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Event reported to a merchant
///
/// Serialized adjacently tagged, so the `data` shape is fixed by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WebhookEvent {
    #[serde(rename = "payment.completed")]
    PaymentCompleted(PaymentCompletedData),
    #[serde(rename = "payout.completed")]
    PayoutCompleted(PayoutCompletedData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaymentCompletedData {
    pub payment_link_id: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PayoutCompletedData {
    pub payout_id: String,
    pub amount: String,
    pub status: String,
}

impl WebhookEvent {
    /// Wire name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PaymentCompleted(_) => "payment.completed",
            Self::PayoutCompleted(_) => "payout.completed",
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event_type())
    }
}

/// Envelope transmitted to the merchant: `{ id, type, data, createdAt }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Delivery identifier, one per logical send
    pub id: Uuid,
    #[serde(flatten)]
    pub event: WebhookEvent,
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

/// A payload frozen for delivery
///
/// Built once per logical send and moved into the delivery task. Attempts
/// only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDelivery {
    pub url: String,
    pub delivery_id: Uuid,
    /// Exact JSON bytes that were signed
    pub body: String,
    /// Lowercase hex HMAC-SHA256 of `body`
    pub signature: String,
}

impl SignedDelivery {
    /// Value for the signature header
    pub fn signature_header(&self) -> String {
        format!("{SIGNATURE_PREFIX}{}", self.signature)
    }
}

/// `createdAt` in the `2024-01-31T12:00:00.000Z` form receivers expect.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
