//! Order placement and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CustomerId, Money, OrderId};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::application::OrderApplication;
use crate::domain::{Order, OrderItem};
use crate::ports::{OrderRepository, PaymentPort};

// -- Request types --

#[derive(Debug, Deserialize, Serialize)]
pub struct PlaceOrderRequest {
    pub customer_id: i64,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderItemRequest {
    pub product_code: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

// -- Response types --

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub total_price_cents: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderItemResponse {
    pub product_code: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

impl From<PlaceOrderRequest> for Order {
    fn from(req: PlaceOrderRequest) -> Self {
        let items = req
            .items
            .into_iter()
            .map(|item| {
                OrderItem::new(
                    item.product_code,
                    Money::from_cents(item.unit_price_cents),
                    item.quantity,
                )
            })
            .collect();
        Order::new(CustomerId::new(req.customer_id), items)
    }
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().map(|id| id.as_i64()).unwrap_or_default(),
            customer_id: order.customer_id().as_i64(),
            status: order.status().to_string(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemResponse {
                    product_code: item.product_code.clone(),
                    unit_price_cents: item.unit_price.cents(),
                    quantity: item.quantity,
                })
                .collect(),
            total_price_cents: order.total_price().cents(),
            created_at: order.created_at().map(|t| t.to_rfc3339()),
        }
    }
}

// -- Handlers --

/// POST /orders: validate, persist and charge an order.
#[tracing::instrument(skip_all, fields(customer_id))]
pub async fn place<R, P>(
    State(app): State<Arc<OrderApplication<R, P>>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    R: OrderRepository + 'static,
    P: PaymentPort + 'static,
{
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::Span::current().record("customer_id", req.customer_id);
    let order = app.place_order(req.into()).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// GET /orders/{id}: load a stored order.
#[tracing::instrument(skip(app))]
pub async fn get<R, P>(
    State(app): State<Arc<OrderApplication<R, P>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    R: OrderRepository + 'static,
    P: PaymentPort + 'static,
{
    let order_id = id
        .parse::<i64>()
        .map(OrderId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id {id:?}: {e}")))?;

    let order = app.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}
