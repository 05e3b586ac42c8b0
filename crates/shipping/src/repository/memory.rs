use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Shipping, ShippingId};
use crate::error::RepositoryError;
use crate::ports::ShippingRepository;

#[derive(Debug, Default)]
struct InMemoryShippingState {
    shippings: HashMap<ShippingId, Shipping>,
    last_id: i64,
    fail_on_save: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingRepository {
    state: Arc<RwLock<InMemoryShippingState>>,
}

impl InMemoryShippingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    pub async fn shipping_count(&self) -> usize {
        self.state.read().await.shippings.len()
    }
}

#[async_trait]
impl ShippingRepository for InMemoryShippingRepository {
    async fn get(&self, id: ShippingId) -> Result<Shipping, RepositoryError> {
        self.state
            .read()
            .await
            .shippings
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, shipping: &mut Shipping) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        if state.fail_on_save {
            return Err(RepositoryError::Unavailable(
                "shipping store rejected the write".to_string(),
            ));
        }

        state.last_id += 1;
        let id = ShippingId::new(state.last_id);
        shipping.assign_id(id);
        state.shippings.insert(id, shipping.clone());

        Ok(())
    }
}
