//! Test doubles shared by the order integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::{CreatePaymentRequest, CreatePaymentResponse, CustomerId, Money, Status};
use order::{ChargeTransport, InMemoryOrderRepository, Order, OrderItem, OrderRepository, PaymentPort};

/// Payment port that records every order it is asked to charge, and whether
/// that order was already readable from the store at the time.
#[derive(Clone)]
pub struct RecordingPayment {
    repository: InMemoryOrderRepository,
    charged: Arc<Mutex<Vec<(Order, bool)>>>,
    result: Arc<Mutex<Result<(), Status>>>,
}

impl RecordingPayment {
    pub fn new(repository: InMemoryOrderRepository) -> Self {
        Self {
            repository,
            charged: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(Mutex::new(Ok(()))),
        }
    }

    pub fn fail_with(&self, status: Status) {
        *self.result.lock().unwrap() = Err(status);
    }

    pub fn charge_count(&self) -> usize {
        self.charged.lock().unwrap().len()
    }

    pub fn charged(&self) -> Vec<(Order, bool)> {
        self.charged.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentPort for RecordingPayment {
    async fn charge(&self, order: &Order) -> Result<(), Status> {
        let stored = match order.id() {
            Some(id) => self.repository.get(id).await.is_ok(),
            None => false,
        };
        self.charged.lock().unwrap().push((order.clone(), stored));
        self.result.lock().unwrap().clone()
    }
}

pub enum Step {
    Fail(Status),
    Hang(Duration),
}

/// Transport that plays back a script, one step per call, and succeeds once
/// the script runs out.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    steps: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<CreatePaymentRequest>>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            requests: Arc::default(),
        }
    }

    pub fn unavailable_times(n: usize) -> Self {
        Self::new(
            (1..=n)
                .map(|i| Step::Fail(Status::unavailable(format!("payment down (call {i})"))))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CreatePaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChargeTransport for ScriptedTransport {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, Status> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() as i64
        };
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Fail(status)) => Err(status),
            Some(Step::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                Ok(CreatePaymentResponse { payment_id: call })
            }
            None => Ok(CreatePaymentResponse { payment_id: call }),
        }
    }
}

pub fn order_of(items: &[(i64, u32)]) -> Order {
    let items = items
        .iter()
        .enumerate()
        .map(|(i, &(dollars, quantity))| {
            OrderItem::new(format!("SKU-{:03}", i + 1), Money::from_dollars(dollars), quantity)
        })
        .collect();
    Order::new(CustomerId::new(77), items)
}
