//! Server Configuration
//!
//! Read from Shuttle secrets at startup. Every value has a default so a bare
//! deployment works for local development.

use std::str::FromStr;

use stablerail::WebhookDeliveryConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:4000";
const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:4000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Public origin used to build checkout URLs, without trailing slash
    pub base_url: String,
    /// Request header carrying the merchant API key (lowercase)
    pub api_key_header: String,
    pub cors_origins: Vec<String>,
    pub webhook: WebhookDeliveryConfig,
    pub demo_merchant: Option<DemoMerchantConfig>,
}

/// Merchant upserted at startup for demos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoMerchantConfig {
    pub name: String,
    pub api_key: String,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
}

impl ServerConfig {
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get("BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key_header = get("API_KEY_HEADER")
            .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string())
            .to_ascii_lowercase();

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .filter(|origin| {
                // credentialed CORS cannot use a wildcard origin
                if origin == "*" {
                    tracing::warn!("⚠️  Ignoring wildcard CORS origin, list origins explicitly");
                }
                origin != "*"
            })
            .collect();

        let defaults = WebhookDeliveryConfig::default();
        let webhook = WebhookDeliveryConfig {
            max_attempts: parse_or(get("WEBHOOK_MAX_ATTEMPTS"), "WEBHOOK_MAX_ATTEMPTS", defaults.max_attempts)
                .max(1),
            initial_delay_ms: parse_or(
                get("WEBHOOK_INITIAL_DELAY_MS"),
                "WEBHOOK_INITIAL_DELAY_MS",
                defaults.initial_delay_ms,
            ),
            request_timeout_ms: parse_or(
                get("WEBHOOK_TIMEOUT_MS"),
                "WEBHOOK_TIMEOUT_MS",
                defaults.request_timeout_ms,
            ),
            user_agent: defaults.user_agent,
        };

        if webhook.request_timeout() >= webhook.delay_before(1) {
            tracing::warn!(
                "⚠️  WEBHOOK_TIMEOUT_MS ({}) is not shorter than the first retry delay ({}ms)",
                webhook.request_timeout_ms,
                webhook.initial_delay_ms
            );
        }

        let demo_merchant = get("DEMO_MERCHANT_API_KEY").map(|api_key| DemoMerchantConfig {
            name: get("DEMO_MERCHANT_NAME").unwrap_or_else(|| "Demo Merchant".to_string()),
            api_key,
            webhook_url: get("DEMO_MERCHANT_WEBHOOK_URL"),
            webhook_secret: get("DEMO_MERCHANT_WEBHOOK_SECRET"),
        });

        Self {
            base_url,
            api_key_header,
            cors_origins,
            webhook,
            demo_merchant,
        }
    }

    /// Checkout page URL for a payment link
    pub fn checkout_url(&self, link_id: impl std::fmt::Display) -> String {
        format!("{}/pay/{}", self.base_url, link_id)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr + Copy>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("⚠️  Invalid {key} value {value:?}, using default");
            default
        }),
        None => default,
    }
}
