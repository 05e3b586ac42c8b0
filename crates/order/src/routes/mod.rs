//! HTTP surface of the order service.

pub mod orders;

use axum::response::{IntoResponse, Response};
use common::{Code, Status};

use crate::error::OrderError;

/// API-level error type, rendered as a [`Status`] body.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request from the client.
    BadRequest(String),
    /// Failure reported by the order core.
    Order(OrderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(msg) => Status::invalid_argument(msg),
            ApiError::Order(err) => err.to_status(),
        };

        if matches!(status.code(), Code::Internal | Code::Unknown) {
            tracing::error!(error = %status, "internal server error");
        }

        status.into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}
