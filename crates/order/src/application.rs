//! Order placement: validate, persist, then charge.

use common::OrderId;

use crate::domain::Order;
use crate::error::OrderError;
use crate::ports::{OrderRepository, PaymentPort};

/// Largest quantity a single order line may carry.
pub const MAX_ITEM_QUANTITY: u32 = 50;

/// Sequences validation, persistence and the remote charge for one order.
///
/// There is no compensation: when the charge fails after the save succeeded,
/// the order stays stored as it was written and the charge error is returned.
pub struct OrderApplication<R, P>
where
    R: OrderRepository,
    P: PaymentPort,
{
    repository: R,
    payment: P,
}

impl<R, P> OrderApplication<R, P>
where
    R: OrderRepository,
    P: PaymentPort,
{
    pub fn new(repository: R, payment: P) -> Self {
        Self {
            repository,
            payment,
        }
    }

    /// Places an order and returns it with the id assigned by the store.
    ///
    /// Nothing is saved or charged for an order that fails validation. The
    /// charge is only attempted once the save has succeeded, and any save or
    /// charge error is returned as reported.
    #[tracing::instrument(
        skip(self, order),
        fields(customer_id = %order.customer_id(), items = order.items().len())
    )]
    pub async fn place_order(&self, order: Order) -> Result<Order, OrderError> {
        let started = std::time::Instant::now();
        let result = self.run_place_order(order).await;

        metrics::histogram!("place_order_duration_seconds", "outcome" => outcome(&result))
            .record(started.elapsed().as_secs_f64());

        result
    }

    async fn run_place_order(&self, mut order: Order) -> Result<Order, OrderError> {
        if let Err(err) = validate(&order) {
            metrics::counter!("orders_rejected_total").increment(1);
            tracing::info!(error = %err, "order rejected");
            return Err(err);
        }

        self.repository.save(&mut order).await?;
        let order_id = order.id().ok_or(OrderError::MissingId)?;
        tracing::debug!(%order_id, "order persisted");

        if let Err(status) = self.payment.charge(&order).await {
            metrics::counter!("order_charge_failed_total", "code" => status.code().as_str())
                .increment(1);
            tracing::warn!(
                %order_id,
                code = %status.code(),
                error = %status,
                "charge failed after the order was persisted, order left in place"
            );
            return Err(status.into());
        }

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(%order_id, total = %order.total_price(), "order placed");

        Ok(order)
    }

    /// Loads a stored order.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        Ok(self.repository.get(order_id).await?)
    }
}

fn outcome(result: &Result<Order, OrderError>) -> &'static str {
    match result {
        Ok(_) => "placed",
        Err(OrderError::InvalidArgument(_)) => "rejected",
        Err(OrderError::Persistence(_) | OrderError::MissingId) => "store_failed",
        Err(OrderError::Payment(_)) => "charge_failed",
    }
}

fn validate(order: &Order) -> Result<(), OrderError> {
    if order.items().is_empty() {
        return Err(OrderError::InvalidArgument(
            "an order needs at least one item".to_string(),
        ));
    }

    for item in order.items() {
        if item.quantity == 0 {
            return Err(OrderError::InvalidArgument(format!(
                "item {} has quantity 0, quantities must be positive",
                item.product_code
            )));
        }
        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(OrderError::InvalidArgument(format!(
                "item {} has quantity {}, no item may exceed {MAX_ITEM_QUANTITY}",
                item.product_code, item.quantity
            )));
        }
        if item.unit_price.is_negative() {
            return Err(OrderError::InvalidArgument(format!(
                "item {} has negative unit price {}",
                item.product_code, item.unit_price
            )));
        }
    }

    if order.checked_total_price().is_none() {
        return Err(OrderError::InvalidArgument(
            "order total is too large to represent".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderItem;
    use crate::repository::InMemoryOrderRepository;
    use async_trait::async_trait;
    use common::{CustomerId, Money, Status};
    use metrics_exporter_prometheus::PrometheusBuilder;

    struct FixedPayment(Result<(), Status>);

    #[async_trait]
    impl PaymentPort for FixedPayment {
        async fn charge(&self, _order: &Order) -> Result<(), Status> {
            self.0.clone()
        }
    }

    fn order_with_quantities(quantities: &[u32]) -> Order {
        let items = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| OrderItem::new(format!("SKU-{i:03}"), Money::from_cents(100), q))
            .collect();
        Order::new(CustomerId::new(1), items)
    }

    #[test]
    fn test_validate_accepts_limit() {
        assert!(validate(&order_with_quantities(&[1, 50])).is_ok());
    }

    #[test]
    fn test_validate_rejects_over_limit() {
        let err = validate(&order_with_quantities(&[2, 51])).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
        assert!(err.to_string().contains("SKU-001"));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let err = validate(&order_with_quantities(&[3, 0])).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
        assert!(err.to_string().contains("SKU-001"));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let order = Order::new(
            CustomerId::new(1),
            vec![OrderItem::new("SKU-NEG", Money::from_cents(-5000), 1)],
        );

        let err = validate(&order).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
        assert!(err.to_string().contains("SKU-NEG"));
    }

    #[test]
    fn test_validate_accepts_free_item() {
        let order = Order::new(
            CustomerId::new(1),
            vec![OrderItem::new("SKU-FREE", Money::zero(), 1)],
        );
        assert!(validate(&order).is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_total() {
        let order = Order::new(
            CustomerId::new(1),
            vec![OrderItem::new("SKU-BIG", Money::from_cents(i64::MAX / 2 + 1), 2)],
        );

        let err = validate(&order).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
    }

    #[test]
    fn test_duration_is_recorded_for_every_outcome() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let repository = InMemoryOrderRepository::new();
        let app = OrderApplication::new(repository.clone(), FixedPayment(Ok(())));
        let failing = OrderApplication::new(
            repository.clone(),
            FixedPayment(Err(Status::unavailable("payment down"))),
        );

        metrics::with_local_recorder(&recorder, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                app.place_order(order_with_quantities(&[1])).await.unwrap();
                app.place_order(order_with_quantities(&[51])).await.unwrap_err();
                failing.place_order(order_with_quantities(&[1])).await.unwrap_err();
                repository.set_fail_on_save(true).await;
                app.place_order(order_with_quantities(&[1])).await.unwrap_err();
            });
        });

        let rendered = handle.render();
        for outcome in ["placed", "rejected", "charge_failed", "store_failed"] {
            assert!(
                rendered.contains(&format!(
                    "place_order_duration_seconds_count{{outcome=\"{outcome}\"}} 1"
                )),
                "missing {outcome} in:\n{rendered}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_order() {
        let err = validate(&order_with_quantities(&[])).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
    }
}
