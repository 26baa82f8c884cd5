//! PostgreSQL Repository Implementations

mod merchant_repository;
mod payment_link_repository;

pub use merchant_repository::PgMerchantRepository;
pub use payment_link_repository::PgPaymentLinkRepository;
