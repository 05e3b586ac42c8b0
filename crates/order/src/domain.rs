//! Order records.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId};
use serde::{Deserialize, Serialize};

/// Status every order is created with. Nothing in the service moves an order
/// out of it.
pub const STATUS_PENDING: &str = "Pending";

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product code (SKU).
    pub product_code: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_code: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self {
            product_code: product_code.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the total price for this line (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Line total, or `None` when it does not fit in `i64` cents.
    pub fn checked_total_price(&self) -> Option<Money> {
        self.unit_price.checked_multiply(self.quantity)
    }
}

/// A customer order.
///
/// The total price is not a field: it is recomputed from the items on every
/// call so it cannot drift from them. The id and creation time are only ever
/// filled in by an order store on a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: Option<OrderId>,
    customer_id: CustomerId,
    status: String,
    items: Vec<OrderItem>,
    created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a new, not yet persisted order.
    pub fn new(customer_id: CustomerId, items: Vec<OrderItem>) -> Self {
        Self {
            id: None,
            customer_id,
            status: STATUS_PENDING.to_string(),
            items,
            created_at: None,
        }
    }

    /// Rebuilds an order read back from a store.
    pub fn restore(
        id: OrderId,
        customer_id: CustomerId,
        status: impl Into<String>,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            customer_id,
            status: status.into(),
            items,
            created_at: Some(created_at),
        }
    }

    /// Records the identity handed out by a store. Called by store
    /// implementations once the order is durable.
    pub fn mark_persisted(&mut self, id: OrderId, created_at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(created_at);
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Sum of price * quantity across all items.
    ///
    /// Saturates on overflow; orders that passed validation never do.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }

    /// Order total, or `None` when any line or the sum overflows.
    pub fn checked_total_price(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::zero(), |total, item| {
            total.checked_add(item.checked_total_price()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_is_derived_from_items() {
        let order = Order::new(
            CustomerId::new(1),
            vec![
                OrderItem::new("SKU-001", Money::from_dollars(10), 2),
                OrderItem::new("SKU-002", Money::from_dollars(5), 3),
            ],
        );
        assert_eq!(order.total_price(), Money::from_dollars(35));
    }

    #[test]
    fn test_new_order_is_not_persisted() {
        let order = Order::new(CustomerId::new(1), vec![]);
        assert_eq!(order.id(), None);
        assert_eq!(order.created_at(), None);
        assert_eq!(order.status(), STATUS_PENDING);
        assert!(!order.is_persisted());
        assert!(order.total_price().cents() == 0);
    }

    #[test]
    fn test_mark_persisted_assigns_identity() {
        let mut order = Order::new(
            CustomerId::new(9),
            vec![OrderItem::new("SKU-001", Money::from_cents(250), 4)],
        );
        let now = Utc::now();
        order.mark_persisted(OrderId::new(42), now);

        assert_eq!(order.id(), Some(OrderId::new(42)));
        assert_eq!(order.created_at(), Some(now));
        assert_eq!(order.total_price().cents(), 1000);
    }

    #[test]
    fn test_checked_total_detects_overflow() {
        let order = Order::new(
            CustomerId::new(1),
            vec![
                OrderItem::new("SKU-001", Money::from_cents(i64::MAX / 4), 2),
                OrderItem::new("SKU-002", Money::from_cents(i64::MAX / 4), 3),
            ],
        );

        assert_eq!(order.checked_total_price(), None);
        assert_eq!(order.total_price().cents(), i64::MAX);
    }
}
