//! Background delivery with bounded exponential backoff
//!
//! Every logical send runs as its own tokio task. The task owns the frozen
//! [`SignedDelivery`] and threads a [`DeliveryState`] through its attempts,
//! so concurrent sends share nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::payload::prepare_delivery;
use crate::domain::entities::{SignedDelivery, WebhookEvent};
use crate::ports::{AttemptOutcome, WebhookDeliveryConfig, WebhookTransport};

/// Progress of one logical send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Attempt `attempt` (0-based) runs after waiting `delay_ms`
    Attempting { attempt: u32, delay_ms: u64 },
    /// The endpoint acknowledged with a 2xx
    Delivered { attempts: u32 },
    /// Every allowed attempt failed
    Exhausted { attempts: u32 },
}

impl DeliveryState {
    pub fn initial() -> Self {
        Self::Attempting {
            attempt: 0,
            delay_ms: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting { .. })
    }

    /// Transition after the current attempt finished.
    ///
    /// Terminal states are returned unchanged.
    pub fn advance(self, succeeded: bool, config: &WebhookDeliveryConfig) -> Self {
        let Self::Attempting { attempt, .. } = self else {
            return self;
        };
        let attempts = attempt + 1;

        if succeeded {
            Self::Delivered { attempts }
        } else if attempts < config.max_attempts {
            Self::Attempting {
                attempt: attempts,
                delay_ms: config.delay_before(attempts).as_millis() as u64,
            }
        } else {
            Self::Exhausted { attempts }
        }
    }
}

/// Fire-and-forget webhook sender
pub struct WebhookDispatcher<T: WebhookTransport + ?Sized> {
    transport: Arc<T>,
    config: WebhookDeliveryConfig,
}

impl<T: WebhookTransport + ?Sized> Clone for WebhookDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

impl<T: WebhookTransport + ?Sized + 'static> WebhookDispatcher<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_config(transport, WebhookDeliveryConfig::default())
    }

    pub fn with_config(transport: Arc<T>, config: WebhookDeliveryConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &WebhookDeliveryConfig {
        &self.config
    }

    /// Sign `event` for `url` and deliver it in the background.
    ///
    /// Returns as soon as the delivery task is spawned. The outcome is never
    /// reported back; failures end up in the logs only. Must be called from
    /// within a tokio runtime.
    pub fn send_webhook(&self, url: &str, event: WebhookEvent, secret: &str) {
        let event_type = event.event_type();
        match prepare_delivery(url, event, secret) {
            Ok(delivery) => {
                // Detached: dropping the handle does not cancel the task.
                drop(self.spawn_delivery(delivery));
            }
            Err(e) => {
                tracing::error!(url, event_type, error = %e, "Failed to build webhook payload");
            }
        }
    }

    /// Spawn the retry loop for an already signed delivery.
    ///
    /// The handle resolves to the terminal state; callers that fire and
    /// forget can simply drop it.
    pub fn spawn_delivery(&self, delivery: SignedDelivery) -> JoinHandle<DeliveryState> {
        let transport = Arc::clone(&self.transport);
        let config = self.config.clone();
        tokio::spawn(async move { run_delivery(transport.as_ref(), &delivery, &config).await })
    }
}

async fn run_delivery<T: WebhookTransport + ?Sized>(
    transport: &T,
    delivery: &SignedDelivery,
    config: &WebhookDeliveryConfig,
) -> DeliveryState {
    let mut state = DeliveryState::initial();

    while let DeliveryState::Attempting { attempt, delay_ms } = state {
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let outcome = transport.attempt(delivery).await;
        if !outcome.is_success() {
            log_failed_attempt(delivery, attempt, &outcome);
        }

        state = state.advance(outcome.is_success(), config);
        match state {
            DeliveryState::Attempting { attempt, delay_ms } => {
                tracing::debug!(
                    delivery_id = %delivery.delivery_id,
                    next_attempt = attempt,
                    delay_ms,
                    "Webhook retry scheduled"
                );
            }
            DeliveryState::Delivered { attempts } => {
                tracing::info!(
                    url = %delivery.url,
                    delivery_id = %delivery.delivery_id,
                    attempts,
                    "Webhook delivered"
                );
            }
            DeliveryState::Exhausted { attempts } => {
                tracing::warn!(
                    url = %delivery.url,
                    delivery_id = %delivery.delivery_id,
                    attempts,
                    "Webhook delivery abandoned after final attempt"
                );
            }
        }
    }

    state
}

fn log_failed_attempt(delivery: &SignedDelivery, attempt: u32, outcome: &AttemptOutcome) {
    match outcome {
        AttemptOutcome::Rejected { status } => {
            tracing::warn!(
                url = %delivery.url,
                delivery_id = %delivery.delivery_id,
                attempt,
                status,
                "Webhook endpoint returned non-2xx"
            );
        }
        AttemptOutcome::TransportError(detail) => {
            tracing::warn!(
                url = %delivery.url,
                delivery_id = %delivery.delivery_id,
                attempt,
                error = %detail,
                "Webhook delivery failed"
            );
        }
        AttemptOutcome::Delivered { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PaymentCompletedData, PayoutCompletedData};
    use crate::webhook::verify_webhook_signature;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Transport that replays scripted outcomes and records every attempt
    struct ScriptedTransport {
        script: Mutex<VecDeque<AttemptOutcome>>,
        attempts: Mutex<Vec<(Instant, SignedDelivery)>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<AttemptOutcome>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                attempts: Mutex::new(Vec::new()),
            })
        }

        fn always_failing() -> Arc<Self> {
            Self::new(Vec::new())
        }

        fn attempts(&self) -> Vec<(Instant, SignedDelivery)> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WebhookTransport for ScriptedTransport {
        async fn attempt(&self, delivery: &SignedDelivery) -> AttemptOutcome {
            self.attempts
                .lock()
                .unwrap()
                .push((Instant::now(), delivery.clone()));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(AttemptOutcome::TransportError("connection refused".into()))
        }
    }

    fn payment_event() -> WebhookEvent {
        WebhookEvent::PaymentCompleted(PaymentCompletedData {
            payment_link_id: "pl_1".into(),
            amount: "10.50".into(),
            currency: "USDC".into(),
            status: "paid".into(),
        })
    }

    fn delivery() -> SignedDelivery {
        prepare_delivery("https://merchant.test/hooks", payment_event(), "s3cret").unwrap()
    }

    fn offsets(attempts: &[(Instant, SignedDelivery)]) -> Vec<Duration> {
        let start = attempts[0].0;
        attempts.iter().map(|(at, _)| *at - start).collect()
    }

    fn assert_near(actual: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(10),
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_state_machine_transitions() {
        let config = WebhookDeliveryConfig::default();
        let s0 = DeliveryState::initial();

        assert_eq!(s0.advance(true, &config), DeliveryState::Delivered { attempts: 1 });

        let s1 = s0.advance(false, &config);
        assert_eq!(
            s1,
            DeliveryState::Attempting {
                attempt: 1,
                delay_ms: 1000
            }
        );

        let s2 = s1.advance(false, &config);
        assert_eq!(
            s2,
            DeliveryState::Attempting {
                attempt: 2,
                delay_ms: 2000
            }
        );

        let done = s2.advance(false, &config);
        assert_eq!(done, DeliveryState::Exhausted { attempts: 3 });
        assert!(done.is_terminal());
        assert_eq!(done.advance(true, &config), done);
    }

    #[test]
    fn test_single_attempt_config_never_retries() {
        let config = WebhookDeliveryConfig {
            max_attempts: 1,
            ..Default::default()
        };
        assert_eq!(
            DeliveryState::initial().advance(false, &config),
            DeliveryState::Exhausted { attempts: 1 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_endpoint_gets_exactly_three_attempts() {
        let transport = ScriptedTransport::always_failing();
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        let state = dispatcher.spawn_delivery(delivery()).await.unwrap();
        assert_eq!(state, DeliveryState::Exhausted { attempts: 3 });

        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 3);

        let offsets = offsets(&attempts);
        assert_near(offsets[1], 1000);
        assert_near(offsets[2], 3000);

        // nothing else fires later
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(transport.attempts().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejections_are_retried_like_transport_errors() {
        let transport = ScriptedTransport::new(vec![
            AttemptOutcome::Rejected { status: 400 },
            AttemptOutcome::Rejected { status: 503 },
            AttemptOutcome::Rejected { status: 404 },
        ]);
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        let state = dispatcher.spawn_delivery(delivery()).await.unwrap();

        assert_eq!(state, DeliveryState::Exhausted { attempts: 3 });
        assert_eq!(transport.attempts().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_reuse_identical_bytes_signature_and_id() {
        let transport = ScriptedTransport::always_failing();
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        dispatcher.send_webhook("https://merchant.test/hooks", payment_event(), "s3cret");
        tokio::time::sleep(Duration::from_secs(10)).await;

        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 3);

        let first = &attempts[0].1;
        for (_, retry) in &attempts[1..] {
            assert_eq!(retry, first);
        }
        assert!(verify_webhook_signature(&first.body, &first.signature_header(), "s3cret"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_retry_stops_further_attempts() {
        let transport = ScriptedTransport::new(vec![
            AttemptOutcome::TransportError("timed out".into()),
            AttemptOutcome::Delivered { status: 200 },
        ]);
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        let state = dispatcher.spawn_delivery(delivery()).await.unwrap();
        assert_eq!(state, DeliveryState::Delivered { attempts: 2 });

        tokio::time::sleep(Duration::from_secs(60)).await;
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 2);
        assert_near(offsets(&attempts)[1], 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_is_immediate() {
        let transport = ScriptedTransport::new(vec![AttemptOutcome::Delivered { status: 202 }]);
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));
        let started = Instant::now();

        let state = dispatcher.spawn_delivery(delivery()).await.unwrap();

        assert_eq!(state, DeliveryState::Delivered { attempts: 1 });
        assert_eq!(transport.attempts()[0].0, started);
    }

    #[tokio::test]
    async fn test_send_webhook_returns_before_first_attempt() {
        let transport = ScriptedTransport::new(vec![AttemptOutcome::Delivered { status: 200 }]);
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        dispatcher.send_webhook("https://merchant.test/hooks", payment_event(), "s3cret");
        // current-thread runtime: the spawned task cannot have run yet
        assert!(transport.attempts().is_empty());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(transport.attempts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_sends_do_not_share_state() {
        let transport = ScriptedTransport::new(vec![
            AttemptOutcome::Delivered { status: 200 },
            AttemptOutcome::Rejected { status: 500 },
        ]);
        let dispatcher = WebhookDispatcher::new(Arc::clone(&transport));

        let payout = WebhookEvent::PayoutCompleted(PayoutCompletedData {
            payout_id: "po_1".into(),
            amount: "5.00".into(),
            status: "completed".into(),
        });

        let first = dispatcher.spawn_delivery(delivery());
        let second = dispatcher.spawn_delivery(
            prepare_delivery("https://other.test/hooks", payout, "other").unwrap(),
        );

        let states = [first.await.unwrap(), second.await.unwrap()];
        assert!(states.contains(&DeliveryState::Delivered { attempts: 1 }));
        assert!(states.contains(&DeliveryState::Exhausted { attempts: 3 }));

        let attempts = transport.attempts();
        let ids: std::collections::HashSet<_> =
            attempts.iter().map(|(_, d)| d.delivery_id).collect();
        assert_eq!(attempts.len(), 4);
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_backoff_config() {
        let transport = ScriptedTransport::always_failing();
        let config = WebhookDeliveryConfig {
            max_attempts: 4,
            initial_delay_ms: 250,
            ..Default::default()
        };
        let dispatcher = WebhookDispatcher::with_config(Arc::clone(&transport), config);

        let state = dispatcher.spawn_delivery(delivery()).await.unwrap();
        assert_eq!(state, DeliveryState::Exhausted { attempts: 4 });

        let offsets = offsets(&transport.attempts());
        assert_near(offsets[1], 250);
        assert_near(offsets[2], 750);
        assert_near(offsets[3], 1750);
    }

    /// Log sink shared with a fmt subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_transport_error_is_logged_with_detail() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let delivery = delivery();
        tracing::subscriber::with_default(subscriber, || {
            log_failed_attempt(
                &delivery,
                1,
                &AttemptOutcome::TransportError("connection refused".into()),
            );
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("connection refused"));
        assert!(output.contains(&delivery.delivery_id.to_string()));
        assert!(output.contains("attempt=1"));
    }
}
