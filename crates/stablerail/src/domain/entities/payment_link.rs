//! PaymentLink - a requested payment that a payer completes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{PaymentLinkStatus, DEFAULT_CURRENCY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    pub id: Uuid,
    pub merchant_id: Uuid,
    /// Decimal amount kept as text so it is never rounded through a float
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
    pub status: PaymentLinkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentLink {
    /// Create a pending link after validating the amount.
    pub fn new(
        merchant_id: Uuid,
        amount: String,
        currency: Option<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_amount(&amount)?;

        let currency = currency
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            merchant_id,
            amount,
            currency,
            description,
            status: PaymentLinkStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentLinkStatus::Paid
    }
}

/// Accepts plain non-negative decimals such as `10`, `10.5` or `0.000001`.
pub fn validate_amount(amount: &str) -> Result<(), DomainError> {
    let invalid = || {
        DomainError::Validation("amount is required and must be a decimal string".to_string())
    };

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
    }
    Ok(())
}
