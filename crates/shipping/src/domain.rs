use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "Pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingId(i64);

impl ShippingId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ShippingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A delivery scheduled for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    id: Option<ShippingId>,
    customer_id: CustomerId,
    order_id: OrderId,
    status: String,
    delivery_days: u32,
    created_at: DateTime<Utc>,
}

impl Shipping {
    /// New pending shipping, timestamped now.
    pub fn new(customer_id: CustomerId, order_id: OrderId, delivery_days: u32) -> Self {
        Self {
            id: None,
            customer_id,
            order_id,
            status: STATUS_PENDING.to_string(),
            delivery_days,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: ShippingId,
        customer_id: CustomerId,
        order_id: OrderId,
        status: impl Into<String>,
        delivery_days: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            customer_id,
            order_id,
            status: status.into(),
            delivery_days,
            created_at,
        }
    }

    pub fn assign_id(&mut self, id: ShippingId) {
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<ShippingId> {
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

    pub fn delivery_days(&self) -> u32 {
        self.delivery_days
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shipping_is_pending_and_timestamped() {
        let before = Utc::now();
        let shipping = Shipping::new(CustomerId::new(1), OrderId::new(2), 3);

        assert_eq!(shipping.status(), STATUS_PENDING);
        assert_eq!(shipping.id(), None);
        assert!(shipping.created_at() >= before);
    }
}
