use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Payment, PaymentId};
use crate::error::RepositoryError;
use crate::ports::PaymentRepository;

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<PaymentId, Payment>,
    last_id: i64,
    fail_on_save: bool,
}

/// In-memory payment store with sequential ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// All stored payments, ordered by id.
    pub async fn payments(&self) -> Vec<Payment> {
        let state = self.state.read().await;
        let mut payments: Vec<_> = state.payments.values().cloned().collect();
        payments.sort_by_key(|p| p.id());
        payments
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn get(&self, id: PaymentId) -> Result<Payment, RepositoryError> {
        self.state
            .read()
            .await
            .payments
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, payment: &mut Payment) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        if state.fail_on_save {
            return Err(RepositoryError::Unavailable(
                "payment store rejected the write".to_string(),
            ));
        }

        state.last_id += 1;
        let id = PaymentId::new(state.last_id);
        payment.mark_persisted(id, Utc::now());
        state.payments.insert(id, payment.clone());

        Ok(())
    }
}
