use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId};
use sqlx::{PgPool, Row};

use crate::domain::{Payment, PaymentId};
use crate::error::RepositoryError;
use crate::ports::PaymentRepository;

/// PostgreSQL-backed payment store.
#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn get(&self, id: PaymentId) -> Result<Payment, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT customer_id, order_id, status, total_price_cents, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))?;

        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Payment::restore(
            id,
            CustomerId::new(row.try_get("customer_id")?),
            OrderId::new(row.try_get("order_id")?),
            row.try_get::<String, _>("status")?,
            Money::from_cents(row.try_get("total_price_cents")?),
            created_at,
        ))
    }

    async fn save(&self, payment: &mut Payment) -> Result<(), RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO payments (customer_id, order_id, status, total_price_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(payment.customer_id().as_i64())
        .bind(payment.order_id().as_i64())
        .bind(payment.status())
        .bind(payment.total_price().cents())
        .fetch_one(&self.pool)
        .await?;

        payment.mark_persisted(PaymentId::new(row.try_get("id")?), row.try_get("created_at")?);
        Ok(())
    }
}
