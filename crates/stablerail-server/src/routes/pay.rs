//! Public Payment Routes - checkout API (no auth)

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use super::payment_link_id;
use crate::error::{ApiResult, ErrorResponse};
use crate::models::{PublicPaymentLinkResponse, SimulatePaymentResponse};
use crate::AppState;

/// Payment link details for the checkout page
#[utoipa::path(
    get,
    path = "/v1/public/payment-links/{id}",
    params(
        ("id" = String, Path, description = "Payment link ID")
    ),
    responses(
        (status = 200, description = "Payment link found", body = PublicPaymentLinkResponse),
        (status = 404, description = "Payment link not found", body = ErrorResponse)
    ),
    tag = "Checkout"
)]
pub async fn get_public_payment_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicPaymentLinkResponse>> {
    let link = state.payment_link_service.get_public(payment_link_id(&id)?).await?;
    Ok(Json(link.into()))
}

/// Simulate a USDC payment for a link
///
/// Marks the link paid and notifies the merchant's webhook in the
/// background. The response does not wait for webhook delivery.
#[utoipa::path(
    post,
    path = "/v1/public/payment-links/{id}/simulate-pay",
    params(
        ("id" = String, Path, description = "Payment link ID")
    ),
    responses(
        (status = 200, description = "Payment simulated", body = SimulatePaymentResponse),
        (status = 400, description = "Payment already completed", body = ErrorResponse),
        (status = 404, description = "Payment link not found", body = ErrorResponse)
    ),
    tag = "Checkout"
)]
pub async fn simulate_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SimulatePaymentResponse>> {
    let link = state.payment_link_service.simulate_payment(payment_link_id(&id)?).await?;
    Ok(Json(link.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/public/payment-links/:id",
            get(get_public_payment_link),
        )
        .route(
            "/v1/public/payment-links/:id/simulate-pay",
            post(simulate_payment),
        )
}
