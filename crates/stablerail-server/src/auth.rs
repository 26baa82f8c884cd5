//! Merchant API Key Authentication
//!
//! Looks up the merchant owning the key sent in the configured header
//! (`x-api-key` by default) and attaches it to the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use stablerail::Merchant;

use crate::error::ApiError;
use crate::AppState;

/// Merchant resolved from the request's API key
#[derive(Debug, Clone)]
pub struct AuthenticatedMerchant(pub Merchant);

/// Authentication middleware
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = request
        .headers()
        .get(state.config.api_key_header.as_str())
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_owned);

    let Some(api_key) = api_key else {
        tracing::warn!("Missing API key header");
        return Err(ApiError::Unauthorized(
            "Missing or invalid API key".to_string(),
        ));
    };

    let merchant = state
        .merchant_service
        .authenticate(&api_key)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Invalid API key attempted");
            ApiError::Unauthorized("Invalid API key".to_string())
        })?;

    request
        .extensions_mut()
        .insert(AuthenticatedMerchant(merchant));
    Ok(next.run(request).await)
}
