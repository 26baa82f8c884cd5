//! Webhook Verification Route
//!
//! Exposes the merchant-side signature check over HTTP so integrators can
//! test their setup against real deliveries.

use axum::{body::Bytes, http::HeaderMap, routing::post, Json, Router};

use stablerail::{verify_webhook_signature, SIGNATURE_HEADER};

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::VerifyWebhookResponse;
use crate::AppState;

/// Header carrying the secret to verify against
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Verify a webhook body against its signature header
#[utoipa::path(
    post,
    path = "/v1/webhooks/verify",
    request_body(content = String, description = "Raw webhook body exactly as received", content_type = "application/json"),
    params(
        ("x-webhook-signature" = String, Header, description = "Received signature header, sha256=<hex>"),
        ("x-webhook-secret" = String, Header, description = "Shared webhook secret")
    ),
    responses(
        (status = 200, description = "Verification verdict", body = VerifyWebhookResponse),
        (status = 400, description = "Missing header", body = ErrorResponse)
    ),
    tag = "Webhooks"
)]
pub async fn verify_webhook(
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<VerifyWebhookResponse>> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::BadRequest(format!("Missing {name} header")))
    };

    let signature = header(SIGNATURE_HEADER)?;
    let secret = header(SECRET_HEADER)?;

    Ok(Json(VerifyWebhookResponse {
        valid: verify_webhook_signature(&body, signature, secret),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/webhooks/verify", post(verify_webhook))
}
