//! Capabilities the order core depends on.

use async_trait::async_trait;
use common::{OrderId, Status};

use crate::domain::Order;
use crate::error::RepositoryError;

/// Durable storage for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Loads an order by id, `NotFound` if there is none.
    async fn get(&self, id: OrderId) -> Result<Order, RepositoryError>;

    /// Persists a new order and assigns its id via [`Order::mark_persisted`].
    async fn save(&self, order: &mut Order) -> Result<(), RepositoryError>;
}

/// Charges a customer for a persisted order on the remote payment service.
#[async_trait]
pub trait PaymentPort: Send + Sync {
    /// Returns `Ok(())` only once the payment service acknowledged the charge.
    async fn charge(&self, order: &Order) -> Result<(), Status>;
}
