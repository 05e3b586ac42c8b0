//! Order store implementations.

mod memory;
mod postgres;

pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
