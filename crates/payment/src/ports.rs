use async_trait::async_trait;

use crate::domain::{Payment, PaymentId};
use crate::error::RepositoryError;

/// Durable storage for payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get(&self, id: PaymentId) -> Result<Payment, RepositoryError>;

    /// Persists a new payment and assigns its id.
    async fn save(&self, payment: &mut Payment) -> Result<(), RepositoryError>;
}
