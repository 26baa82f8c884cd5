//! Webhook Engine
//!
//! Signs merchant webhook payloads and delivers them in the background
//! with bounded exponential backoff.
//!
//! - `signer`: HMAC-SHA256 over the exact payload bytes
//! - `payload`: envelope construction, serialized once per logical send
//! - `dispatcher`: fire-and-forget delivery task and its retry state machine
//! - `verifier`: constant-time check merchants run on received deliveries

mod dispatcher;
mod payload;
mod signer;
mod verifier;

pub use dispatcher::{DeliveryState, WebhookDispatcher};
pub use payload::{build_payload, prepare_delivery};
pub use signer::sign;
pub use verifier::verify_webhook_signature;
