//! PaymentLink DTOs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use stablerail::PaymentLink;

/// Request to create a payment link
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentLinkRequest {
    /// Decimal amount as a string, e.g. "10.50"
    pub amount: Option<String>,
    /// Defaults to USDC
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// Payment link as seen by its merchant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    pub id: Uuid,
    /// Checkout page URL to share with the payer
    pub url: String,
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
    /// pending | paid | expired
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PaymentLinkResponse {
    /// List item view, without `updatedAt`
    pub fn summary(link: PaymentLink, url: String) -> Self {
        Self {
            id: link.id,
            url,
            amount: link.amount,
            currency: link.currency,
            description: link.description,
            status: link.status.to_string(),
            created_at: iso8601(&link.created_at),
            updated_at: None,
        }
    }

    /// Full view, including `updatedAt`
    pub fn detail(link: PaymentLink, url: String) -> Self {
        let updated_at = iso8601(&link.updated_at);
        Self {
            updated_at: Some(updated_at),
            ..Self::summary(link, url)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPaymentLinksResponse {
    pub data: Vec<PaymentLinkResponse>,
}

/// Payment link as shown on the public checkout page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicPaymentLinkResponse {
    pub id: Uuid,
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
    pub status: String,
}

impl From<PaymentLink> for PublicPaymentLinkResponse {
    fn from(link: PaymentLink) -> Self {
        Self {
            id: link.id,
            amount: link.amount,
            currency: link.currency,
            description: link.description,
            status: link.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SimulatePaymentResponse {
    pub id: Uuid,
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub message: String,
}

impl From<PaymentLink> for SimulatePaymentResponse {
    fn from(link: PaymentLink) -> Self {
        Self {
            id: link.id,
            amount: link.amount,
            currency: link.currency,
            status: link.status.to_string(),
            message: "Payment simulated successfully".to_string(),
        }
    }
}

fn iso8601(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
