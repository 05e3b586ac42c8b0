pub mod payments;

use axum::response::{IntoResponse, Response};
use common::{Code, Status};

use crate::error::PaymentError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Payment(PaymentError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(msg) => Status::invalid_argument(msg),
            ApiError::Payment(err) => err.to_status(),
        };

        if matches!(status.code(), Code::Internal | Code::Unknown) {
            tracing::error!(error = %status, "internal server error");
        }

        status.into_response()
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Payment(err)
    }
}
