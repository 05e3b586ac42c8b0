//! Payment service.
//!
//! Records one charge per request. Requests above [`MAX_PAYMENT`] are
//! rejected with `invalid_argument` and never retried by callers.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use application::{MAX_PAYMENT, PaymentApplication};
pub use config::Config;
pub use domain::{Payment, PaymentId};
pub use error::{PaymentError, RepositoryError};
pub use ports::PaymentRepository;
pub use repository::{InMemoryPaymentRepository, PostgresPaymentRepository};

pub const SERVICE_NAME: &str = "payment";

pub fn create_app<R: PaymentRepository + 'static>(
    app: Arc<PaymentApplication<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(common::server::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(|| async { common::server::health(SERVICE_NAME) }))
        .route("/payments", post(routes::payments::create::<R>))
        .route("/payments/{id}", get(routes::payments::get::<R>))
        .with_state(app)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
