//! Value Objects
//!
//! Immutable status types shared by entities and webhook events.

mod payment_link_status;
mod payout_status;

pub use payment_link_status::PaymentLinkStatus;
pub use payout_status::PayoutStatus;

/// Currency used when a payment link is created without one
pub const DEFAULT_CURRENCY: &str = "USDC";
