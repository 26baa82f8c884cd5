//! Payment Link Routes - merchant API
//!
//! All handlers require a valid API key (see `crate::auth`).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use super::payment_link_id;
use crate::auth::AuthenticatedMerchant;
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::{CreatePaymentLinkRequest, ListPaymentLinksResponse, PaymentLinkResponse};
use crate::AppState;

/// Create a payment link
#[utoipa::path(
    post,
    path = "/v1/payment-links",
    request_body = CreatePaymentLinkRequest,
    responses(
        (status = 201, description = "Payment link created", body = PaymentLinkResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    tag = "Payment Links"
)]
pub async fn create_payment_link(
    State(state): State<AppState>,
    Extension(AuthenticatedMerchant(merchant)): Extension<AuthenticatedMerchant>,
    payload: Result<Json<CreatePaymentLinkRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PaymentLinkResponse>)> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let amount = payload
        .amount
        .filter(|a| !a.is_empty())
        .ok_or_else(|| {
            ApiError::BadRequest("amount is required and must be a string".to_string())
        })?;

    let link = state
        .payment_link_service
        .create(merchant.id, amount, payload.currency, payload.description)
        .await?;

    let url = state.config.checkout_url(link.id);
    Ok((
        StatusCode::CREATED,
        Json(PaymentLinkResponse::summary(link, url)),
    ))
}

/// List the merchant's payment links, newest first
#[utoipa::path(
    get,
    path = "/v1/payment-links",
    responses(
        (status = 200, description = "Payment links", body = ListPaymentLinksResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    tag = "Payment Links"
)]
pub async fn list_payment_links(
    State(state): State<AppState>,
    Extension(AuthenticatedMerchant(merchant)): Extension<AuthenticatedMerchant>,
) -> ApiResult<Json<ListPaymentLinksResponse>> {
    let links = state.payment_link_service.list(merchant.id).await?;

    let data = links
        .into_iter()
        .map(|link| {
            let url = state.config.checkout_url(link.id);
            PaymentLinkResponse::summary(link, url)
        })
        .collect();

    Ok(Json(ListPaymentLinksResponse { data }))
}

/// Get one of the merchant's payment links
#[utoipa::path(
    get,
    path = "/v1/payment-links/{id}",
    params(
        ("id" = String, Path, description = "Payment link ID")
    ),
    responses(
        (status = 200, description = "Payment link found", body = PaymentLinkResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Payment link not found", body = ErrorResponse)
    ),
    tag = "Payment Links"
)]
pub async fn get_payment_link(
    State(state): State<AppState>,
    Extension(AuthenticatedMerchant(merchant)): Extension<AuthenticatedMerchant>,
    Path(id): Path<String>,
) -> ApiResult<Json<PaymentLinkResponse>> {
    let link = state
        .payment_link_service
        .get_for_merchant(payment_link_id(&id)?, merchant.id)
        .await?;

    let url = state.config.checkout_url(link.id);
    Ok(Json(PaymentLinkResponse::detail(link, url)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/payment-links",
            get(list_payment_links).post(create_payment_link),
        )
        .route("/v1/payment-links/:id", get(get_payment_link))
}
