//! Payment service error types.

use common::{Code, Status};
use thiserror::Error;

use crate::domain::PaymentId;

/// Errors raised by a payment store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Payment not found: {0}")]
    NotFound(PaymentId),

    #[error("Payment store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Errors returned by [`PaymentApplication`](crate::PaymentApplication).
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl PaymentError {
    pub fn code(&self) -> Code {
        match self {
            PaymentError::InvalidArgument(_) => Code::InvalidArgument,
            PaymentError::Persistence(RepositoryError::NotFound(_)) => Code::NotFound,
            PaymentError::Persistence(RepositoryError::Unavailable(_))
            | PaymentError::Persistence(RepositoryError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_),
            )) => Code::Unavailable,
            PaymentError::Persistence(_) => Code::Internal,
        }
    }

    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }
}
