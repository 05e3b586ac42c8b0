//! Retry decorator for the payment transport.
//!
//! Every attempt runs under its own deadline. Only codes in the policy's
//! retryable set are retried; a timed-out attempt reports `DeadlineExceeded`,
//! which the default policy does not retry, so a slow payment service ends the
//! call on the first timeout.

use std::time::Duration;

use async_trait::async_trait;
use common::{Code, CreatePaymentRequest, CreatePaymentResponse, Status};
use tokio::time::{sleep, timeout};

use super::transport::ChargeTransport;

/// When and how often a failed charge call is repeated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Codes that trigger another attempt.
    pub retryable: Vec<Code>,
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Linear backoff step: the wait before retry `n` is `n * backoff_step`.
    pub backoff_step: Duration,
    /// Deadline applied to each attempt on its own.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retryable: vec![Code::Unavailable, Code::ResourceExhausted],
            max_attempts: 5,
            backoff_step: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, code: Code) -> bool {
        self.retryable.contains(&code)
    }

    /// Wait before the retry that follows failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}

/// Wraps a [`ChargeTransport`] with per-attempt deadlines and bounded retries.
#[derive(Clone, Debug)]
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: ChargeTransport> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn attempt(
        &self,
        request: &CreatePaymentRequest,
        attempt: u32,
    ) -> Result<CreatePaymentResponse, Status> {
        match timeout(
            self.policy.attempt_timeout,
            self.inner.create_payment(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(Status::deadline_exceeded(format!(
                "payment attempt {attempt} exceeded {}ms",
                self.policy.attempt_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl<T: ChargeTransport> ChargeTransport for RetryingTransport<T> {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, Status> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            metrics::counter!("payment_charge_attempts_total").increment(1);

            let status = match self.attempt(request, attempt).await {
                Ok(response) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "payment charge succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(status) => status,
            };

            if !self.policy.is_retryable(status.code()) {
                tracing::debug!(attempt, error = %status, "non-retryable payment failure");
                return Err(status);
            }

            if attempt >= self.policy.max_attempts {
                tracing::error!(
                    attempt,
                    error = %status,
                    "payment charge failed after all attempts"
                );
                return Err(status);
            }

            let delay = self.policy.backoff(attempt);
            tracing::warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                error = %status,
                delay_ms = delay.as_millis() as u64,
                "transient payment failure, retrying after delay"
            );
            metrics::counter!("payment_charge_retries_total").increment(1);
            sleep(delay).await;
        }
    }
}
