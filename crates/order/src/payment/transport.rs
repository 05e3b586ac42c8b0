//! Raw calls to the payment service.

use std::time::Duration;

use async_trait::async_trait;
use common::{Code, CreatePaymentRequest, CreatePaymentResponse, Status};

/// One `Create` call against the payment service, no retries.
#[async_trait]
pub trait ChargeTransport: Send + Sync {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, Status>;
}

/// JSON-over-HTTP client for the payment service's `POST /payments`.
#[derive(Clone, Debug)]
pub struct HttpChargeTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChargeTransport {
    /// Builds a client for the payment service at `base_url`.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/payments", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChargeTransport for HttpChargeTransport {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, Status> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let http_status = response.status();
        if http_status.is_success() {
            return response.json::<CreatePaymentResponse>().await.map_err(|e| {
                Status::internal(format!("unreadable payment response: {e}"))
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        Err(serde_json::from_slice::<Status>(&body).unwrap_or_else(|_| {
            Status::new(
                Code::from_http_status(http_status.as_u16()),
                format!(
                    "payment service returned {http_status}: {}",
                    String::from_utf8_lossy(&body)
                ),
            )
        }))
    }
}

fn classify(err: reqwest::Error) -> Status {
    if err.is_timeout() {
        Status::deadline_exceeded(err.to_string())
    } else if err.is_connect() || err.is_request() {
        Status::unavailable(err.to_string())
    } else if err.is_decode() || err.is_body() {
        Status::internal(err.to_string())
    } else {
        Status::new(Code::Unknown, err.to_string())
    }
}
