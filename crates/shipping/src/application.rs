//! Scheduling shipments for placed orders.

use crate::domain::{Shipping, ShippingId};
use crate::error::ShippingError;
use crate::ports::ShippingRepository;

pub struct ShippingApplication<R: ShippingRepository> {
    repository: R,
}

impl<R: ShippingRepository> ShippingApplication<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Stores a new shipping and returns it with its id.
    #[tracing::instrument(
        skip(self, shipping),
        fields(order_id = %shipping.order_id(), customer_id = %shipping.customer_id())
    )]
    pub async fn create(&self, mut shipping: Shipping) -> Result<Shipping, ShippingError> {
        if shipping.delivery_days() == 0 {
            return Err(ShippingError::InvalidArgument(
                "delivery_days must be at least 1".to_string(),
            ));
        }

        self.repository.save(&mut shipping).await?;

        metrics::counter!("shippings_created_total").increment(1);
        tracing::info!(shipping_id = ?shipping.id(), "shipping scheduled");

        Ok(shipping)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_shipping(&self, id: ShippingId) -> Result<Shipping, ShippingError> {
        Ok(self.repository.get(id).await?)
    }
}
