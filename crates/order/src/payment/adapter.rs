//! Payment port implementation over a charge transport.

use async_trait::async_trait;
use common::{Code, CreatePaymentRequest, Status};

use super::retry::{RetryPolicy, RetryingTransport};
use super::transport::{ChargeTransport, HttpChargeTransport};
use crate::domain::Order;
use crate::ports::PaymentPort;

/// Name reported in log records about the payment dependency.
pub const PAYMENT_SERVICE: &str = "payment";

/// [`PaymentPort`] backed by the remote payment service.
///
/// Holds no order state between calls.
#[derive(Clone, Debug)]
pub struct PaymentAdapter<T> {
    transport: T,
}

impl PaymentAdapter<RetryingTransport<HttpChargeTransport>> {
    /// Client for the payment service at `base_url`, retried per `policy`.
    pub fn connect(base_url: &str, policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        let transport = HttpChargeTransport::new(base_url, policy.attempt_timeout)?;
        Ok(Self::new(RetryingTransport::new(transport, policy)))
    }
}

impl<T: ChargeTransport> PaymentAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: ChargeTransport> PaymentPort for PaymentAdapter<T> {
    #[tracing::instrument(skip(self, order), fields(order_id, customer_id = %order.customer_id()))]
    async fn charge(&self, order: &Order) -> Result<(), Status> {
        let order_id = order.id().ok_or_else(|| {
            Status::new(
                Code::FailedPrecondition,
                "cannot charge an order that has not been persisted",
            )
        })?;
        tracing::Span::current().record("order_id", tracing::field::display(order_id));

        let request = CreatePaymentRequest::new(order.customer_id(), order_id, order.total_price());

        match self.transport.create_payment(&request).await {
            Ok(response) => {
                tracing::debug!(payment_id = response.payment_id, "payment acknowledged");
                Ok(())
            }
            Err(status) => {
                if status.code() == Code::DeadlineExceeded {
                    tracing::warn!(
                        service = PAYMENT_SERVICE,
                        %order_id,
                        customer_id = %order.customer_id(),
                        error = %status,
                        "payment cancelled, charge attempt timed out"
                    );
                }
                Err(status)
            }
        }
    }
}
