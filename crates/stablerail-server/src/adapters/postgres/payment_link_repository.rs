//! PostgreSQL implementation of PaymentLinkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stablerail::{DomainError, PaymentLink, PaymentLinkRepository};

pub struct PgPaymentLinkRepository {
    pool: PgPool,
}

impl PgPaymentLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct PaymentLinkRow {
    id: Uuid,
    merchant_id: Uuid,
    amount: String,
    currency: String,
    description: Option<String>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<PaymentLinkRow> for PaymentLink {
    type Error = DomainError;

    fn try_from(row: PaymentLinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            merchant_id: row.merchant_id,
            amount: row.amount,
            currency: row.currency,
            description: row.description,
            status: row.status.parse().map_err(DomainError::Repository)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn repo_err(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

#[async_trait]
impl PaymentLinkRepository for PgPaymentLinkRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError> {
        sqlx::query_as::<_, PaymentLinkRow>("SELECT * FROM payment_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repo_err)?
            .map(PaymentLink::try_from)
            .transpose()
    }

    async fn find_for_merchant(
        &self,
        id: Uuid,
        merchant_id: Uuid,
    ) -> Result<Option<PaymentLink>, DomainError> {
        sqlx::query_as::<_, PaymentLinkRow>(
            "SELECT * FROM payment_links WHERE id = $1 AND merchant_id = $2",
        )
        .bind(id)
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repo_err)?
        .map(PaymentLink::try_from)
        .transpose()
    }

    async fn list_by_merchant(&self, merchant_id: Uuid) -> Result<Vec<PaymentLink>, DomainError> {
        let rows = sqlx::query_as::<_, PaymentLinkRow>(
            "SELECT * FROM payment_links WHERE merchant_id = $1 ORDER BY created_at DESC",
        )
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(repo_err)?;

        rows.into_iter().map(PaymentLink::try_from).collect()
    }

    async fn create(&self, link: &PaymentLink) -> Result<PaymentLink, DomainError> {
        let row = sqlx::query_as::<_, PaymentLinkRow>(
            r#"
            INSERT INTO payment_links
                (id, merchant_id, amount, currency, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(link.id)
        .bind(link.merchant_id)
        .bind(&link.amount)
        .bind(&link.currency)
        .bind(&link.description)
        .bind(link.status.as_str())
        .bind(link.created_at)
        .bind(link.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(repo_err)?;

        row.try_into()
    }

    async fn mark_paid(&self, id: Uuid) -> Result<Option<PaymentLink>, DomainError> {
        // Conditional update so two concurrent payers cannot both succeed
        sqlx::query_as::<_, PaymentLinkRow>(
            r#"
            UPDATE payment_links
            SET status = 'paid', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repo_err)?
        .map(PaymentLink::try_from)
        .transpose()
    }
}
