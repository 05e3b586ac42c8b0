//! Payment records.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId};
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "Pending";

/// Identifier assigned to a payment by the payment store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A charge against a customer for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: Option<PaymentId>,
    customer_id: CustomerId,
    order_id: OrderId,
    status: String,
    total_price: Money,
    created_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn new(customer_id: CustomerId, order_id: OrderId, total_price: Money) -> Self {
        Self {
            id: None,
            customer_id,
            order_id,
            status: STATUS_PENDING.to_string(),
            total_price,
            created_at: None,
        }
    }

    /// Rebuilds a payment read back from a store.
    pub fn restore(
        id: PaymentId,
        customer_id: CustomerId,
        order_id: OrderId,
        status: impl Into<String>,
        total_price: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            customer_id,
            order_id,
            status: status.into(),
            total_price,
            created_at: Some(created_at),
        }
    }

    pub fn mark_persisted(&mut self, id: PaymentId, created_at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(created_at);
    }

    pub fn id(&self) -> Option<PaymentId> {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
