//! Charge endpoints called by the order service.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CreatePaymentRequest, CreatePaymentResponse};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::application::PaymentApplication;
use crate::domain::{Payment, PaymentId};
use crate::ports::PaymentRepository;

#[derive(Debug, Deserialize, Serialize)]
pub struct PaymentResponse {
    pub id: i64,
    pub customer_id: i64,
    pub order_id: i64,
    pub status: String,
    pub total_price_cents: i64,
    pub created_at: Option<String>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id().map(|id| id.as_i64()).unwrap_or_default(),
            customer_id: payment.customer_id().as_i64(),
            order_id: payment.order_id().as_i64(),
            status: payment.status().to_string(),
            total_price_cents: payment.total_price().cents(),
            created_at: payment.created_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// POST /payments: record a charge for an order.
#[tracing::instrument(skip_all, fields(order_id, customer_id))]
pub async fn create<R: PaymentRepository + 'static>(
    State(app): State<Arc<PaymentApplication<R>>>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePaymentResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let span = tracing::Span::current();
    span.record("order_id", req.order_id.as_i64());
    span.record("customer_id", req.customer_id.as_i64());
    let payment = Payment::new(req.customer_id, req.order_id, req.total_price());

    let payment = app.charge(payment).await?;
    let payment_id = payment.id().map(|id| id.as_i64()).unwrap_or_default();

    Ok((StatusCode::CREATED, Json(CreatePaymentResponse { payment_id })))
}

/// GET /payments/{id}
#[tracing::instrument(skip(app))]
pub async fn get<R: PaymentRepository + 'static>(
    State(app): State<Arc<PaymentApplication<R>>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id = id
        .parse::<i64>()
        .map(PaymentId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid payment id {id:?}: {e}")))?;

    let payment = app.get_payment(payment_id).await?;
    Ok(Json(PaymentResponse::from(&payment)))
}
