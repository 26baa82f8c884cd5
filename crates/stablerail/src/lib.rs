//! Stablerail Domain Library
//!
//! Core domain types, ports and the merchant webhook engine for the
//! Stablerail payment-link platform.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Merchant, PaymentLink, webhook events and envelopes
//!   - `value_objects/`: Status enums
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `webhook`: Single-attempt delivery transport
//!
//! - **Webhook Engine** (`webhook/`): signing, payload construction,
//!   background delivery with backoff, and signature verification
//!
//! # Usage
//!
//! ```rust,ignore
//! use stablerail::{WebhookDispatcher, WebhookEvent, verify_webhook_signature};
//!
//! dispatcher.send_webhook(&merchant_url, event, merchant.webhook_signing_secret());
//!
//! // merchant side
//! if !verify_webhook_signature(&raw_body, &signature_header, &secret) {
//!     // reject with 401
//! }
//! ```

pub mod domain;
pub mod ports;
pub mod webhook;

// Re-export commonly used types
pub use domain::{
    DomainError, Merchant, PaymentCompletedData, PaymentLink, PaymentLinkStatus,
    PayoutCompletedData, PayoutStatus, SignedDelivery, WebhookEvent, WebhookPayload,
    DEFAULT_CURRENCY, DELIVERY_ID_HEADER, SIGNATURE_HEADER, SIGNATURE_PREFIX,
};
pub use ports::{
    AttemptOutcome, MerchantRepository, PaymentLinkRepository, WebhookDeliveryConfig,
    WebhookTransport,
};
pub use webhook::{
    build_payload, prepare_delivery, sign, verify_webhook_signature, DeliveryState,
    WebhookDispatcher,
};
