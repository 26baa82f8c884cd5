//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod postgres;
pub mod webhook;

// Re-exports
pub use postgres::{PgMerchantRepository, PgPaymentLinkRepository};
pub use webhook::HttpWebhookTransport;
