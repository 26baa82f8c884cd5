//! Checkout Page - served at /pay/:id

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};

use crate::AppState;

const CHECKOUT_TEMPLATE: &str = include_str!("../../assets/checkout.html");

/// Render the checkout page for a link
///
/// The page loads link details and triggers payment through the public API.
pub async fn checkout_page(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    Html(render_checkout(&id, &state.config.base_url))
}

fn render_checkout(link_id: &str, api_base: &str) -> String {
    CHECKOUT_TEMPLATE
        .replace("__LINK_ID__", &script_literal(link_id))
        .replace("__API_BASE__", &script_literal(api_base))
}

/// JSON string literal that is also safe inside a `<script>` element
fn script_literal(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace("</", "<\\/")
}

pub fn router() -> Router<AppState> {
    Router::new().route("/pay/:id", get(checkout_page))
}
