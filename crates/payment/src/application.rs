//! Charging customers.

use common::Money;

use crate::domain::{Payment, PaymentId};
use crate::error::PaymentError;
use crate::ports::PaymentRepository;

/// Largest amount a single payment may carry ($1000.00).
pub const MAX_PAYMENT: Money = Money::from_cents(100_000);

pub struct PaymentApplication<R: PaymentRepository> {
    repository: R,
}

impl<R: PaymentRepository> PaymentApplication<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Records a charge. Negative payments and payments above
    /// [`MAX_PAYMENT`] are rejected before anything is stored.
    #[tracing::instrument(
        skip(self, payment),
        fields(order_id = %payment.order_id(), customer_id = %payment.customer_id())
    )]
    pub async fn charge(&self, mut payment: Payment) -> Result<Payment, PaymentError> {
        if payment.total_price().is_negative() {
            metrics::counter!("payments_rejected_total").increment(1);
            return Err(PaymentError::InvalidArgument(format!(
                "payment of {} is negative",
                payment.total_price()
            )));
        }

        if payment.total_price() > MAX_PAYMENT {
            metrics::counter!("payments_rejected_total").increment(1);
            return Err(PaymentError::InvalidArgument(format!(
                "payment of {} exceeds the {MAX_PAYMENT} limit",
                payment.total_price()
            )));
        }

        self.repository.save(&mut payment).await?;

        metrics::counter!("payments_created_total").increment(1);
        tracing::info!(
            payment_id = ?payment.id(),
            total = %payment.total_price(),
            "payment recorded"
        );

        Ok(payment)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, PaymentError> {
        Ok(self.repository.get(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryPaymentRepository;
    use common::{CustomerId, OrderId};

    fn payment_of(cents: i64) -> Payment {
        Payment::new(CustomerId::new(1), OrderId::new(9), Money::from_cents(cents))
    }

    #[tokio::test]
    async fn test_charge_records_payment() {
        let repository = InMemoryPaymentRepository::new();
        let app = PaymentApplication::new(repository.clone());

        let payment = app.charge(payment_of(3500)).await.unwrap();

        assert_eq!(payment.id(), Some(PaymentId::new(1)));
        assert_eq!(repository.payment_count().await, 1);
    }

    #[tokio::test]
    async fn test_limit_is_inclusive() {
        let app = PaymentApplication::new(InMemoryPaymentRepository::new());
        assert!(app.charge(payment_of(100_000)).await.is_ok());
    }

    #[tokio::test]
    async fn test_over_limit_is_rejected_without_saving() {
        let repository = InMemoryPaymentRepository::new();
        let app = PaymentApplication::new(repository.clone());

        let err = app.charge(payment_of(100_001)).await.unwrap_err();

        assert!(matches!(err, PaymentError::InvalidArgument(_)));
        assert_eq!(err.code(), common::Code::InvalidArgument);
        assert_eq!(repository.payment_count().await, 0);
    }

    #[tokio::test]
    async fn test_negative_payment_is_rejected_without_saving() {
        let repository = InMemoryPaymentRepository::new();
        let app = PaymentApplication::new(repository.clone());

        let err = app.charge(payment_of(-5000)).await.unwrap_err();

        assert_eq!(err.code(), common::Code::InvalidArgument);
        assert_eq!(repository.payment_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let repository = InMemoryPaymentRepository::new();
        repository.set_fail_on_save(true).await;
        let app = PaymentApplication::new(repository);

        let err = app.charge(payment_of(100)).await.unwrap_err();
        assert_eq!(err.code(), common::Code::Unavailable);
    }
}
