//! Signature verification for received deliveries

use subtle::ConstantTimeEq;

use super::signer::sign;
use crate::domain::entities::SIGNATURE_PREFIX;

/// Check an `x-webhook-signature` header against the raw request body.
///
/// `payload` must be the body exactly as received, before any JSON parsing.
/// The comparison runs in constant time over the header value; a value of
/// the wrong length is rejected outright.
pub fn verify_webhook_signature(
    payload: impl AsRef<[u8]>,
    signature_header: &str,
    secret: &str,
) -> bool {
    let expected = format!("{SIGNATURE_PREFIX}{}", sign(payload.as_ref(), secret));
    expected.as_bytes().ct_eq(signature_header.as_bytes()).into()
}
