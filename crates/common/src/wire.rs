//! Request and response bodies exchanged between services.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Money, OrderId};

/// Body of `POST /payments`.
///
/// Carries no idempotency key: a replayed request is a second charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub total_price_cents: i64,
}

impl CreatePaymentRequest {
    pub fn new(customer_id: CustomerId, order_id: OrderId, total_price: Money) -> Self {
        Self {
            customer_id,
            order_id,
            total_price_cents: total_price.cents(),
        }
    }

    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    pub payment_id: i64,
}

/// Body of `POST /shippings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShippingRequest {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub delivery_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShippingResponse {
    pub shipping_id: i64,
}
