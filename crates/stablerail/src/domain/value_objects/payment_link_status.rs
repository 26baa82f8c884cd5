//! PaymentLinkStatus - lifecycle of a payment link

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment link lifecycle
///
/// Links start `Pending` and move to `Paid` once a payer completes them.
/// `Expired` links can no longer be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentLinkStatus {
    #[default]
    Pending,
    Paid,
    Expired,
}

impl PaymentLinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Expired => "expired",
        }
    }

    /// Whether a payer may still complete this link
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for PaymentLinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentLinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "expired" => Ok(Self::Expired),
            other => Err(format!("Unknown payment link status: {other}")),
        }
    }
}
