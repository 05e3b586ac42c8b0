//! Order service.
//!
//! Places customer orders in three strictly ordered steps:
//! 1. Validate the order (no line may exceed 50 units)
//! 2. Persist it, which assigns its id
//! 3. Charge the customer on the remote payment service
//!
//! There is no distributed transaction around steps 2 and 3. A charge that
//! fails after the save leaves the stored order in place, and charge requests
//! carry no idempotency key, so a retry after a late transport failure can
//! charge twice.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod payment;
pub mod ports;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use application::{MAX_ITEM_QUANTITY, OrderApplication};
pub use config::Config;
pub use domain::{Order, OrderItem};
pub use error::{OrderError, RepositoryError};
pub use payment::{
    ChargeTransport, HttpChargeTransport, PaymentAdapter, RetryPolicy, RetryingTransport,
};
pub use ports::{OrderRepository, PaymentPort};
pub use repository::{InMemoryOrderRepository, PostgresOrderRepository};

/// Name this service reports in health checks.
pub const SERVICE_NAME: &str = "order";

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R, P>(
    app: Arc<OrderApplication<R, P>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    R: OrderRepository + 'static,
    P: PaymentPort + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(common::server::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(|| async { common::server::health(SERVICE_NAME) }))
        .route("/orders", post(routes::orders::place::<R, P>))
        .route("/orders/{id}", get(routes::orders::get::<R, P>))
        .with_state(app)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
