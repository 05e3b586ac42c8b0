use common::{Code, Status};
use thiserror::Error;

use crate::domain::ShippingId;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Shipping not found: {0}")]
    NotFound(ShippingId),

    #[error("Shipping store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored shipping: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug, Error)]
pub enum ShippingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl ShippingError {
    pub fn code(&self) -> Code {
        match self {
            ShippingError::InvalidArgument(_) => Code::InvalidArgument,
            ShippingError::Persistence(RepositoryError::NotFound(_)) => Code::NotFound,
            ShippingError::Persistence(RepositoryError::Unavailable(_)) => Code::Unavailable,
            ShippingError::Persistence(_) => Code::Internal,
        }
    }

    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }
}
