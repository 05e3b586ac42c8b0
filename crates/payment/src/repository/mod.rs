mod memory;
mod postgres;

pub use memory::InMemoryPaymentRepository;
pub use postgres::PostgresPaymentRepository;
