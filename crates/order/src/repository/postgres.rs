use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::{Order, OrderItem};
use crate::error::RepositoryError;
use crate::ports::OrderRepository;

/// PostgreSQL-backed order store.
///
/// An order and its items are written in one transaction; the id comes from
/// the `orders.id` sequence.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url).await?;
        let repository = Self::new(pool);
        repository.run_migrations().await?;
        Ok(repository)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_item(row: PgRow) -> Result<OrderItem, RepositoryError> {
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| RepositoryError::InvalidRecord(format!("negative quantity {quantity}")))?;

        Ok(OrderItem {
            product_code: row.try_get("product_code")?,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
            quantity,
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn get(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))?;

        let items = sqlx::query(
            r#"
            SELECT product_code, unit_price_cents, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Self::row_to_item)
        .collect::<Result<Vec<_>, _>>()?;

        let customer_id: i64 = row.try_get("customer_id")?;
        let status: String = row.try_get("status")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Order::restore(
            id,
            CustomerId::new(customer_id),
            status,
            items,
            created_at,
        ))
    }

    async fn save(&self, order: &mut Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, status)
            VALUES ($1, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(order.customer_id().as_i64())
        .bind(order.status())
        .fetch_one(&mut *tx)
        .await?;

        let id: i64 = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        for (position, item) in order.items().iter().enumerate() {
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::InvalidRecord(format!("quantity {} too large", item.quantity))
            })?;
            let position = i32::try_from(position)
                .map_err(|_| RepositoryError::InvalidRecord("too many items".to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, position, product_code, unit_price_cents, quantity)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(position)
            .bind(&item.product_code)
            .bind(item.unit_price.cents())
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        order.mark_persisted(OrderId::new(id), created_at);

        Ok(())
    }
}
