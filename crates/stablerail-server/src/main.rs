use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod testing;

use adapters::{HttpWebhookTransport, PgMerchantRepository, PgPaymentLinkRepository};
use application::{MerchantService, PaymentLinkService};
use config::ServerConfig;
use stablerail::{WebhookDispatcher, WebhookTransport};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub merchant_service: Arc<MerchantService>,
    pub payment_link_service: Arc<PaymentLinkService>,
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("💸 Stablerail API initializing...");

    let config = ServerConfig::from_secrets(&secrets);

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    let merchant_repo = Arc::new(PgMerchantRepository::new(pool.clone()));
    let payment_link_repo = Arc::new(PgPaymentLinkRepository::new(pool));

    let merchant_service = Arc::new(MerchantService::new(merchant_repo.clone()));

    if let Some(demo) = &config.demo_merchant {
        merchant_service
            .ensure_demo_merchant(demo)
            .await
            .context("Failed to seed demo merchant")?;
    }

    // Webhook delivery
    let transport: Arc<dyn WebhookTransport> = Arc::new(
        HttpWebhookTransport::with_config(&config.webhook)
            .context("Failed to initialize webhook transport")?,
    );
    let dispatcher = WebhookDispatcher::with_config(transport, config.webhook.clone());

    tracing::info!(
        "🔔 Webhook dispatcher initialized ({} attempts, {}ms initial backoff)",
        config.webhook.max_attempts,
        config.webhook.initial_delay_ms
    );

    let payment_link_service = Arc::new(PaymentLinkService::new(
        payment_link_repo,
        merchant_repo,
        dispatcher,
    ));

    let state = AppState {
        config: Arc::new(config),
        merchant_service,
        payment_link_service,
    };

    let router = routes::app(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Stablerail API ready");

    Ok(router.into())
}
