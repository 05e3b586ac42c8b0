use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use sqlx::{PgPool, Row};

use crate::domain::{Shipping, ShippingId};
use crate::error::RepositoryError;
use crate::ports::ShippingRepository;

/// PostgreSQL-backed shipping store.
#[derive(Clone)]
pub struct PostgresShippingRepository {
    pool: PgPool,
}

impl PostgresShippingRepository {
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
impl ShippingRepository for PostgresShippingRepository {
    async fn get(&self, id: ShippingId) -> Result<Shipping, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT customer_id, order_id, status, delivery_days, created_at
            FROM shippings
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))?;

        let delivery_days: i32 = row.try_get("delivery_days")?;
        let delivery_days = u32::try_from(delivery_days).map_err(|_| {
            RepositoryError::InvalidRecord(format!("negative delivery_days {delivery_days}"))
        })?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Shipping::restore(
            id,
            CustomerId::new(row.try_get("customer_id")?),
            OrderId::new(row.try_get("order_id")?),
            row.try_get::<String, _>("status")?,
            delivery_days,
            created_at,
        ))
    }

    async fn save(&self, shipping: &mut Shipping) -> Result<(), RepositoryError> {
        let delivery_days = i32::try_from(shipping.delivery_days()).map_err(|_| {
            RepositoryError::InvalidRecord(format!(
                "delivery_days {} too large",
                shipping.delivery_days()
            ))
        })?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO shippings (customer_id, order_id, status, delivery_days, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(shipping.customer_id().as_i64())
        .bind(shipping.order_id().as_i64())
        .bind(shipping.status())
        .bind(delivery_days)
        .bind(shipping.created_at())
        .fetch_one(&self.pool)
        .await?;

        shipping.assign_id(ShippingId::new(id));
        Ok(())
    }
}
