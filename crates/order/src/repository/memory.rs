use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;
use tokio::sync::RwLock;

use crate::domain::Order;
use crate::error::RepositoryError;
use crate::ports::OrderRepository;

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    last_id: i64,
    fail_on_save: bool,
}

/// In-memory order store, used when no database is configured and in tests.
///
/// Ids are handed out sequentially starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first saved order gets `first_id`.
    pub fn starting_at(first_id: i64) -> Self {
        let state = InMemoryOrderState {
            last_id: first_id - 1,
            ..Default::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Makes every following save fail with `Unavailable`.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    pub async fn contains(&self, id: OrderId) -> bool {
        self.state.read().await.orders.contains_key(&id)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get(&self, id: OrderId) -> Result<Order, RepositoryError> {
        self.state
            .read()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, order: &mut Order) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        if state.fail_on_save {
            return Err(RepositoryError::Unavailable(
                "order store rejected the write".to_string(),
            ));
        }

        state.last_id += 1;
        let id = OrderId::new(state.last_id);
        order.mark_persisted(id, Utc::now());
        state.orders.insert(id, order.clone());

        Ok(())
    }
}
