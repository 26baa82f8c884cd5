//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::models::{
    CreatePaymentLinkRequest, HealthResponse, ListPaymentLinksResponse, PaymentLinkResponse,
    PublicPaymentLinkResponse, SimulatePaymentResponse, VerifyWebhookResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health_check,
        // Merchant API
        super::payment_links::create_payment_link,
        super::payment_links::list_payment_links,
        super::payment_links::get_payment_link,
        // Checkout
        super::pay::get_public_payment_link,
        super::pay::simulate_payment,
        // Webhooks
        super::webhook::verify_webhook,
    ),
    components(schemas(
        CreatePaymentLinkRequest,
        PaymentLinkResponse,
        ListPaymentLinksResponse,
        PublicPaymentLinkResponse,
        SimulatePaymentResponse,
        VerifyWebhookResponse,
        HealthResponse,
        ErrorResponse,
    )),
    modifiers(&ApiKeyAuth),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Payment Links", description = "Merchant payment link management"),
        (name = "Checkout", description = "Public checkout and simulated payment"),
        (name = "Webhooks", description = "Webhook signature verification")
    ),
    info(
        title = "Stablerail API",
        description = "Payment links with signed merchant webhooks"
    )
)]
pub struct ApiDoc;

/// Documents the merchant API key header
struct ApiKeyAuth;

impl Modify for ApiKeyAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
            );
        }
    }
}
