//! Shipping service.

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

pub use application::ShippingApplication;
pub use config::Config;
pub use domain::{Shipping, ShippingId};
pub use error::{RepositoryError, ShippingError};
pub use ports::ShippingRepository;
pub use repository::{InMemoryShippingRepository, PostgresShippingRepository};

pub const SERVICE_NAME: &str = "shipping";

pub fn create_app<R: ShippingRepository + 'static>(
    app: Arc<ShippingApplication<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(common::server::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(|| async { common::server::health(SERVICE_NAME) }))
        .route("/shippings", post(routes::shippings::create::<R>))
        .route("/shippings/{id}", get(routes::shippings::get::<R>))
        .with_state(app)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
