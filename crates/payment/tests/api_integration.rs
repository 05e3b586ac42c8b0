//! Integration tests for the payment service router.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use payment::{InMemoryPaymentRepository, PaymentApplication};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn setup() -> (axum::Router, InMemoryPaymentRepository) {
    let handle = METRICS_HANDLE
        .get_or_init(|| {
            common::server::install_metrics_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone();
    let repository = InMemoryPaymentRepository::new();
    let app = payment::create_app(Arc::new(PaymentApplication::new(repository.clone())), handle);
    (app, repository)
}

fn charge_request(total_price_cents: i64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/payments")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "customer_id": 7,
                "order_id": 42,
                "total_price_cents": total_price_cents
            })
            .to_string(),
        ))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_charge_creates_pending_payment() {
    let (app, repository) = setup();

    let response = app.clone().oneshot(charge_request(3500)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["payment_id"], 1);

    let response = app
        .oneshot(Request::builder().uri("/payments/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["order_id"], 42);
    assert_eq!(json["status"], "Pending");
    assert_eq!(json["total_price_cents"], 3500);
    assert_eq!(repository.payment_count().await, 1);
}

#[tokio::test]
async fn test_charge_over_limit_is_bad_request() {
    let (app, repository) = setup();

    let response = app.oneshot(charge_request(100_001)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_argument");
    assert_eq!(repository.payment_count().await, 0);
}

#[tokio::test]
async fn test_store_failure_is_unavailable() {
    let (app, repository) = setup();
    repository.set_fail_on_save(true).await;

    let response = app.oneshot(charge_request(100)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "unavailable");
}

#[tokio::test]
async fn test_get_missing_payment_is_not_found() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/payments/9").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["service"], "payment");
}

#[tokio::test]
async fn test_malformed_body_gets_status_body() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payments")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"order_id": "abc"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_argument");
}
