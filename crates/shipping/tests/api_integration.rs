//! Integration tests for the shipping service router.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use shipping::{InMemoryShippingRepository, ShippingApplication};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn setup() -> (axum::Router, InMemoryShippingRepository) {
    let handle = METRICS_HANDLE
        .get_or_init(|| {
            common::server::install_metrics_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone();
    let repository = InMemoryShippingRepository::new();
    let app = shipping::create_app(Arc::new(ShippingApplication::new(repository.clone())), handle);
    (app, repository)
}

fn create_request(delivery_days: u32) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/shippings")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "customer_id": 3,
                "order_id": 12,
                "delivery_days": delivery_days
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
async fn test_create_then_get_shipping() {
    let (app, _) = setup();

    let response = app.clone().oneshot(create_request(4)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["shipping_id"], 1);

    let response = app
        .oneshot(Request::builder().uri("/shippings/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["order_id"], 12);
    assert_eq!(json["status"], "Pending");
    assert_eq!(json["delivery_days"], 4);
}

#[tokio::test]
async fn test_invalid_argument_passes_through() {
    let (app, repository) = setup();

    let response = app.oneshot(create_request(0)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "invalid_argument");
    assert_eq!(repository.shipping_count().await, 0);
}

#[tokio::test]
async fn test_store_failure_is_wrapped_as_internal() {
    let (app, repository) = setup();
    repository.set_fail_on_save(true).await;

    let response = app.oneshot(create_request(2)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "internal");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("failed to create shipping: ")
    );
}

#[tokio::test]
async fn test_get_missing_shipping_is_not_found() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/shippings/5").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_gets_status_body() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/shippings")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_argument");
}
