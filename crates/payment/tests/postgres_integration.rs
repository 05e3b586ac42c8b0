//! PostgreSQL payment store tests.
//!
//! Need a local Docker daemon. Run with:
//!
//! ```bash
//! cargo test -p payment --test postgres_integration -- --ignored
//! ```

use std::sync::Arc;

use common::{CustomerId, Money, OrderId};
use payment::{Payment, PaymentId, PaymentRepository, PostgresPaymentRepository, RepositoryError};
use serial_test::serial;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct ContainerInfo {
    #[allow(dead_code)] // keeps the container running
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn repository() -> PostgresPaymentRepository {
    let info = CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();
            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            Arc::new(ContainerInfo {
                container,
                connection_string: format!("postgres://postgres:postgres@{host}:{port}/postgres"),
            })
        })
        .await;

    PostgresPaymentRepository::connect(&info.connection_string)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn test_save_assigns_id_and_reads_back() {
    let repo = repository().await;
    let mut payment = Payment::new(CustomerId::new(4), OrderId::new(19), Money::from_cents(3500));

    repo.save(&mut payment).await.unwrap();

    let id = payment.id().expect("store assigns an id");
    assert!(payment.created_at().is_some());

    let loaded = repo.get(id).await.unwrap();
    assert_eq!(loaded.customer_id(), CustomerId::new(4));
    assert_eq!(loaded.order_id(), OrderId::new(19));
    assert_eq!(loaded.status(), "Pending");
    assert_eq!(loaded.total_price(), Money::from_cents(3500));
    assert_eq!(loaded.created_at(), payment.created_at());
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn test_ids_are_distinct() {
    let repo = repository().await;
    let mut first = Payment::new(CustomerId::new(1), OrderId::new(1), Money::from_cents(100));
    let mut second = Payment::new(CustomerId::new(1), OrderId::new(2), Money::from_cents(200));

    repo.save(&mut first).await.unwrap();
    repo.save(&mut second).await.unwrap();

    assert_ne!(first.id(), second.id());
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn test_missing_payment_is_not_found() {
    let repo = repository().await;

    let err = repo.get(PaymentId::new(i64::MAX)).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound(_)));
}
