//! Stablerail Data Transfer Objects
//!
//! - PaymentLink: merchant and public payment link views
//! - Webhook: signature verification helper

mod payment_link;
mod webhook;

pub use payment_link::*;
pub use webhook::*;
