//! Order service entry point.

use std::sync::Arc;

use common::server::{init_tracing, install_metrics_recorder, shutdown_signal};
use metrics_exporter_prometheus::PrometheusHandle;
use order::{
    Config, HttpChargeTransport, InMemoryOrderRepository, OrderApplication, OrderRepository,
    PaymentAdapter, PostgresOrderRepository, RetryingTransport,
};

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = install_metrics_recorder().expect("failed to install Prometheus recorder");

    // 3. Connect to the payment service
    let payment = PaymentAdapter::connect(&config.payment_service_url, config.payment_retry.clone())
        .expect("failed to initialize payment client");
    tracing::info!(
        url = %config.payment_service_url,
        max_attempts = config.payment_retry.max_attempts,
        "payment client ready"
    );

    // 4. Pick the order store and serve
    match config.database_url.as_deref() {
        Some(url) => {
            let repository = PostgresOrderRepository::connect(url)
                .await
                .expect("failed to connect to database");
            tracing::info!("using postgres order store");
            serve(&config, repository, payment, metrics_handle).await;
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory");
            serve(&config, InMemoryOrderRepository::new(), payment, metrics_handle).await;
        }
    }
}

async fn serve<R: OrderRepository + 'static>(
    config: &Config,
    repository: R,
    payment: PaymentAdapter<RetryingTransport<HttpChargeTransport>>,
    metrics_handle: PrometheusHandle,
) {
    let application = Arc::new(OrderApplication::new(repository, payment));
    let app = order::create_app(application, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting order service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
