//! Stablerail API Routes
//!
//! - /health - Liveness
//! - /v1/payment-links - Merchant payment link management (API key)
//! - /v1/public/payment-links/:id - Checkout API and simulated payment
//! - /pay/:id - Checkout page
//! - /v1/webhooks/verify - Webhook signature check

pub mod checkout;
pub mod health;
pub mod pay;
pub mod payment_links;
pub mod swagger;
pub mod webhook;


use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware, Router,
};
use uuid::Uuid;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    // Protected routes (require a merchant API key)
    let protected_routes = payment_links::router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_api_key,
    ));

    // OpenAPI documentation
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(health::router())
        .merge(pay::router())
        .merge(checkout::router())
        .merge(webhook::router())
        .merge(protected_routes)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Payment link id from a path segment
///
/// A segment that is not a UUID cannot name any link, so it is reported the
/// same way as an unknown id.
pub(crate) fn payment_link_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Payment link not found".to_string()))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let mut allowed_headers = vec![header::CONTENT_TYPE];
    if let Ok(api_key_header) = HeaderName::from_bytes(config.api_key_header.as_bytes()) {
        allowed_headers.push(api_key_header);
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}
