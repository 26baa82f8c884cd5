//! Webhook Transport Port
//!
//! Abstract interface for a single delivery attempt to a merchant endpoint.
//! Retry scheduling lives in the domain (`crate::webhook`); a transport only
//! performs one request and reports what happened.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::domain::entities::SignedDelivery;

/// One-shot webhook delivery
///
/// # Example
///
/// ```rust,ignore
/// use stablerail::ports::{AttemptOutcome, WebhookTransport};
///
/// struct HttpWebhookTransport { /* reqwest client */ }
///
/// #[async_trait]
/// impl WebhookTransport for HttpWebhookTransport {
///     async fn attempt(&self, delivery: &SignedDelivery) -> AttemptOutcome {
///         // POST delivery.body with signature and id headers
///     }
/// }
/// ```
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST the delivery body once
    ///
    /// Never fails: transport errors are reported as
    /// [`AttemptOutcome::TransportError`].
    async fn attempt(&self, delivery: &SignedDelivery) -> AttemptOutcome;
}

/// Result of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Endpoint answered with a 2xx status
    Delivered { status: u16 },
    /// Endpoint answered with any other status
    Rejected { status: u16 },
    /// No response (connect, DNS, TLS, timeout)
    TransportError(String),
}

impl AttemptOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Delivered { status }
        } else {
            Self::Rejected { status }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { status } => write!(f, "delivered ({status})"),
            Self::Rejected { status } => write!(f, "rejected ({status})"),
            Self::TransportError(detail) => write!(f, "transport error: {detail}"),
        }
    }
}

/// Configuration for webhook delivery behavior
#[derive(Debug, Clone)]
pub struct WebhookDeliveryConfig {
    /// Total attempts per logical send, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each later retry
    pub initial_delay_ms: u64,
    /// Per-request timeout for a single attempt, below the first backoff
    pub request_timeout_ms: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for WebhookDeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            request_timeout_ms: 800,
            user_agent: "Stablerail-Webhook/1.0".to_string(),
        }
    }
}

impl WebhookDeliveryConfig {
    /// Delay before attempt `attempt` (0-based): none for the first attempt,
    /// then `initial_delay_ms * 2^(attempt - 1)` with no cap or jitter.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u64.checked_shl(attempt - 1).unwrap_or(u64::MAX);
        Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let config = WebhookDeliveryConfig::default();
        assert_eq!(config.delay_before(0), Duration::ZERO);
        assert_eq!(config.delay_before(1), Duration::from_millis(1000));
        assert_eq!(config.delay_before(2), Duration::from_millis(2000));
        assert_eq!(config.delay_before(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_default_timeout_is_shorter_than_every_backoff() {
        let config = WebhookDeliveryConfig::default();
        for attempt in 1..config.max_attempts {
            assert!(config.request_timeout() < config.delay_before(attempt));
        }
    }

    #[test]
    fn test_backoff_saturates() {
        let config = WebhookDeliveryConfig::default();
        assert_eq!(config.delay_before(200), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_outcome_from_status() {
        assert!(AttemptOutcome::from_status(200).is_success());
        assert!(AttemptOutcome::from_status(204).is_success());
        assert!(!AttemptOutcome::from_status(301).is_success());
        assert!(!AttemptOutcome::from_status(400).is_success());
        assert!(!AttemptOutcome::from_status(503).is_success());
        assert!(!AttemptOutcome::TransportError("refused".into()).is_success());
    }
}
