//! Payload construction

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use super::signer::sign;
use crate::domain::entities::{SignedDelivery, WebhookEvent, WebhookPayload};
use crate::domain::errors::DomainError;

/// Wrap `event` in a fresh envelope and serialize it.
///
/// Generates a random delivery id and stamps the current time (millisecond
/// precision, so the value survives the wire format unchanged). The returned
/// string is the canonical body: `{ id, type, data, createdAt }`.
pub fn build_payload(event: WebhookEvent) -> Result<(WebhookPayload, String), DomainError> {
    let payload = WebhookPayload {
        id: Uuid::new_v4(),
        event,
        created_at: Utc::now().trunc_subsecs(3),
    };
    let body = serde_json::to_string(&payload)?;
    Ok((payload, body))
}

/// Build, serialize and sign a delivery for `url`.
///
/// This is the only place a body is serialized; retries reuse the result.
pub fn prepare_delivery(
    url: &str,
    event: WebhookEvent,
    secret: &str,
) -> Result<SignedDelivery, DomainError> {
    let (payload, body) = build_payload(event)?;
    let signature = sign(body.as_bytes(), secret);

    Ok(SignedDelivery {
        url: url.to_string(),
        delivery_id: payload.id,
        body,
        signature,
    })
}
