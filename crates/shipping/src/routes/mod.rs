pub mod shippings;

use axum::response::{IntoResponse, Response};
use common::{Code, Status};

use crate::error::ShippingError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Failure creating a shipping. Anything but an invalid argument is
    /// reported as internal.
    Create(ShippingError),
    Lookup(ShippingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(msg) => Status::invalid_argument(msg),
            ApiError::Create(err) if err.code() == Code::InvalidArgument => err.to_status(),
            ApiError::Create(err) => {
                Status::internal(format!("failed to create shipping: {err}"))
            }
            ApiError::Lookup(err) => err.to_status(),
        };

        if matches!(status.code(), Code::Internal | Code::Unknown) {
            tracing::error!(error = %status, "internal server error");
        }

        status.into_response()
    }
}
