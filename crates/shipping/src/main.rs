use std::sync::Arc;

use common::server::{init_tracing, install_metrics_recorder, shutdown_signal};
use metrics_exporter_prometheus::PrometheusHandle;
use shipping::{
    Config, InMemoryShippingRepository, PostgresShippingRepository, ShippingApplication,
    ShippingRepository,
};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    init_tracing(&config.log_level, config.log_json);
    let metrics_handle = install_metrics_recorder().expect("failed to install Prometheus recorder");

    match config.database_url.as_deref() {
        Some(url) => {
            let repository = PostgresShippingRepository::connect(url)
                .await
                .expect("failed to connect to database");
            serve(&config, repository, metrics_handle).await;
        }
        None => {
            tracing::warn!("DATABASE_URL not set, shippings are kept in memory");
            serve(&config, InMemoryShippingRepository::new(), metrics_handle).await;
        }
    }
}

async fn serve<R: ShippingRepository + 'static>(
    config: &Config,
    repository: R,
    metrics_handle: PrometheusHandle,
) {
    let app = shipping::create_app(Arc::new(ShippingApplication::new(repository)), metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting shipping service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}
