//! Application Layer
//!
//! Use cases orchestrating domain operations:
//! - MerchantService: API key authentication and demo seeding
//! - PaymentLinkService: payment link lifecycle and payment webhooks

pub mod merchant_service;
pub mod payment_link_service;

pub use merchant_service::MerchantService;
pub use payment_link_service::PaymentLinkService;
