//! Repository Ports
//!
//! Data access interfaces for merchants and payment links.

mod merchant_repository;
mod payment_link_repository;

pub use merchant_repository::MerchantRepository;
pub use payment_link_repository::PaymentLinkRepository;
