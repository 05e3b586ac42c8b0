//! Order service error types.

use common::{Code, OrderId, Status};
use thiserror::Error;

/// Errors raised by an order store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order with this id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The store cannot take requests right now.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// A value does not fit the storage schema.
    #[error("Invalid order record: {0}")]
    InvalidRecord(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    pub fn code(&self) -> Code {
        match self {
            RepositoryError::NotFound(_) => Code::NotFound,
            RepositoryError::Unavailable(_) => Code::Unavailable,
            RepositoryError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                Code::Unavailable
            }
            RepositoryError::InvalidRecord(_)
            | RepositoryError::Database(_)
            | RepositoryError::Migration(_) => Code::Internal,
        }
    }
}

/// Errors returned by [`OrderApplication`](crate::OrderApplication).
///
/// Store and payment failures are carried unchanged so the caller sees
/// exactly what the collaborator reported.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request was rejected before anything was written.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),

    #[error(transparent)]
    Payment(#[from] Status),

    /// The store reported success without assigning an id.
    #[error("Order store accepted the order without assigning an id")]
    MissingId,
}

impl OrderError {
    pub fn code(&self) -> Code {
        match self {
            OrderError::InvalidArgument(_) => Code::InvalidArgument,
            OrderError::Persistence(err) => err.code(),
            OrderError::Payment(status) => status.code(),
            OrderError::MissingId => Code::Internal,
        }
    }

    /// Converts into the status reported to callers.
    pub fn to_status(&self) -> Status {
        match self {
            OrderError::Payment(status) => status.clone(),
            other => Status::new(other.code(), other.to_string()),
        }
    }
}
