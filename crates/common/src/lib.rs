//! Types shared by the order, payment and shipping services.

pub mod server;
pub mod status;
pub mod types;
pub mod wire;

pub use status::{Code, Status};
pub use types::{CustomerId, Money, OrderId};
pub use wire::{
    CreatePaymentRequest, CreatePaymentResponse, CreateShippingRequest, CreateShippingResponse,
};
