//! In-memory adapters for unit and route tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use stablerail::{
    AttemptOutcome, DomainError, Merchant, MerchantRepository, PaymentLink,
    PaymentLinkRepository, PaymentLinkStatus, SignedDelivery, WebhookDispatcher,
    WebhookTransport,
};

use crate::application::{MerchantService, PaymentLinkService};
use crate::config::ServerConfig;
use crate::AppState;

#[derive(Default)]
pub struct InMemoryMerchantRepository {
    merchants: Mutex<HashMap<Uuid, Merchant>>,
}

#[async_trait]
impl MerchantRepository for InMemoryMerchantRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Merchant>, DomainError> {
        Ok(self.merchants.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, DomainError> {
        Ok(self
            .merchants
            .lock()
            .unwrap()
            .values()
            .find(|m| m.api_key == api_key)
            .cloned())
    }

    async fn save(&self, merchant: &Merchant) -> Result<Merchant, DomainError> {
        let mut merchants = self.merchants.lock().unwrap();
        let existing = merchants
            .values()
            .find(|m| m.api_key == merchant.api_key)
            .cloned();

        let saved = match existing {
            Some(current) => Merchant {
                name: merchant.name.clone(),
                webhook_url: merchant.webhook_url.clone(),
                webhook_secret: merchant.webhook_secret.clone(),
                ..current
            },
            None => merchant.clone(),
        };
        merchants.insert(saved.id, saved.clone());
        Ok(saved)
    }
}

#[derive(Default)]
pub struct InMemoryPaymentLinkRepository {
    links: Mutex<Vec<PaymentLink>>,
}

impl InMemoryPaymentLinkRepository {
    pub fn set_status(&self, id: Uuid, status: PaymentLinkStatus) {
        if let Some(link) = self.links.lock().unwrap().iter_mut().find(|l| l.id == id) {
            link.status = status;
        }
    }
}

#[async_trait]
impl PaymentLinkRepository for InMemoryPaymentLinkRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn find_for_merchant(
        &self,
        id: Uuid,
        merchant_id: Uuid,
    ) -> Result<Option<PaymentLink>, DomainError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id && l.merchant_id == merchant_id)
            .cloned())
    }

    async fn list_by_merchant(&self, merchant_id: Uuid) -> Result<Vec<PaymentLink>, DomainError> {
        let mut links: Vec<PaymentLink> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.merchant_id == merchant_id)
            .cloned()
            .collect();
        // insertion order breaks ties between equal timestamps
        links.reverse();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn create(&self, link: &PaymentLink) -> Result<PaymentLink, DomainError> {
        self.links.lock().unwrap().push(link.clone());
        Ok(link.clone())
    }

    async fn mark_paid(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError> {
        let mut links = self.links.lock().unwrap();
        let Some(link) = links
            .iter_mut()
            .find(|l| l.id == id && l.status == PaymentLinkStatus::Pending)
        else {
            return Ok(None);
        };
        link.status = PaymentLinkStatus::Paid;
        link.updated_at = chrono::Utc::now();
        Ok(Some(link.clone()))
    }
}

/// Transport that acknowledges every attempt and keeps what it was sent
#[derive(Default)]
pub struct RecordingTransport {
    deliveries: Mutex<Vec<SignedDelivery>>,
}

impl RecordingTransport {
    pub fn deliveries(&self) -> Vec<SignedDelivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn attempt(&self, delivery: &SignedDelivery) -> AttemptOutcome {
        self.deliveries.lock().unwrap().push(delivery.clone());
        AttemptOutcome::Delivered { status: 200 }
    }
}

/// Application state over in-memory adapters
pub struct TestApp {
    pub state: AppState,
    pub merchants: Arc<InMemoryMerchantRepository>,
    pub links: Arc<InMemoryPaymentLinkRepository>,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    pub fn new() -> Self {
        let merchants = Arc::new(InMemoryMerchantRepository::default());
        let links = Arc::new(InMemoryPaymentLinkRepository::default());
        let transport = Arc::new(RecordingTransport::default());

        let config = ServerConfig::default();
        let shared: Arc<dyn WebhookTransport> = transport.clone();
        let dispatcher = WebhookDispatcher::with_config(shared, config.webhook.clone());

        let state = AppState {
            config: Arc::new(config),
            merchant_service: Arc::new(MerchantService::new(merchants.clone())),
            payment_link_service: Arc::new(PaymentLinkService::new(
                links.clone(),
                merchants.clone(),
                dispatcher,
            )),
        };

        Self {
            state,
            merchants,
            links,
            transport,
        }
    }

    pub async fn add_merchant(&self, merchant: Merchant) -> Merchant {
        self.merchants.save(&merchant).await.unwrap()
    }
}
