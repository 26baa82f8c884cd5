//! Webhook DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of checking a delivery signature
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyWebhookResponse {
    pub valid: bool,
}

/// Service liveness
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
