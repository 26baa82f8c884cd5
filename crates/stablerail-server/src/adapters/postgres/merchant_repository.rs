//! PostgreSQL implementation of MerchantRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stablerail::{DomainError, Merchant, MerchantRepository};

pub struct PgMerchantRepository {
    pool: PgPool,
}

impl PgMerchantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MerchantRow {
    id: Uuid,
    name: String,
    api_key: String,
    webhook_url: Option<String>,
    webhook_secret: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<MerchantRow> for Merchant {
    fn from(row: MerchantRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            api_key: row.api_key,
            webhook_url: row.webhook_url,
            webhook_secret: row.webhook_secret,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MerchantRepository for PgMerchantRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Merchant>, DomainError> {
        let row = sqlx::query_as::<_, MerchantRow>("SELECT * FROM merchants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, DomainError> {
        let row = sqlx::query_as::<_, MerchantRow>("SELECT * FROM merchants WHERE api_key = $1")
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, merchant: &Merchant) -> Result<Merchant, DomainError> {
        let row = sqlx::query_as::<_, MerchantRow>(
            r#"
            INSERT INTO merchants (id, name, api_key, webhook_url, webhook_secret, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (api_key) DO UPDATE
            SET name = EXCLUDED.name,
                webhook_url = EXCLUDED.webhook_url,
                webhook_secret = EXCLUDED.webhook_secret
            RETURNING *
            "#,
        )
        .bind(merchant.id)
        .bind(&merchant.name)
        .bind(&merchant.api_key)
        .bind(&merchant.webhook_url)
        .bind(&merchant.webhook_secret)
        .bind(merchant.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }
}
