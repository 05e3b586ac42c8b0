use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CreateShippingRequest, CreateShippingResponse};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::application::ShippingApplication;
use crate::domain::{Shipping, ShippingId};
use crate::ports::ShippingRepository;

#[derive(Debug, Deserialize, Serialize)]
pub struct ShippingResponse {
    pub id: i64,
    pub customer_id: i64,
    pub order_id: i64,
    pub status: String,
    pub delivery_days: u32,
    pub created_at: String,
}

impl From<&Shipping> for ShippingResponse {
    fn from(shipping: &Shipping) -> Self {
        Self {
            id: shipping.id().map(|id| id.as_i64()).unwrap_or_default(),
            customer_id: shipping.customer_id().as_i64(),
            order_id: shipping.order_id().as_i64(),
            status: shipping.status().to_string(),
            delivery_days: shipping.delivery_days(),
            created_at: shipping.created_at().to_rfc3339(),
        }
    }
}

/// POST /shippings
#[tracing::instrument(skip_all, fields(order_id))]
pub async fn create<R: ShippingRepository + 'static>(
    State(app): State<Arc<ShippingApplication<R>>>,
    payload: Result<Json<CreateShippingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShippingResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::Span::current().record("order_id", req.order_id.as_i64());
    let shipping = Shipping::new(req.customer_id, req.order_id, req.delivery_days);

    let shipping = app.create(shipping).await.map_err(ApiError::Create)?;
    let shipping_id = shipping.id().map(|id| id.as_i64()).unwrap_or_default();

    Ok((StatusCode::CREATED, Json(CreateShippingResponse { shipping_id })))
}

/// GET /shippings/{id}
#[tracing::instrument(skip(app))]
pub async fn get<R: ShippingRepository + 'static>(
    State(app): State<Arc<ShippingApplication<R>>>,
    Path(id): Path<String>,
) -> Result<Json<ShippingResponse>, ApiError> {
    let shipping_id = id
        .parse::<i64>()
        .map(ShippingId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid shipping id {id:?}: {e}")))?;

    let shipping = app
        .get_shipping(shipping_id)
        .await
        .map_err(ApiError::Lookup)?;
    Ok(Json(ShippingResponse::from(&shipping)))
}
