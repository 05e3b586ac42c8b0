//! Client side of the payment service: raw transport, retry decorator and
//! the [`PaymentPort`](crate::ports::PaymentPort) adapter on top.

mod adapter;
mod retry;
mod transport;

pub use adapter::{PAYMENT_SERVICE, PaymentAdapter};
pub use retry::{RetryPolicy, RetryingTransport};
pub use transport::{ChargeTransport, HttpChargeTransport};
