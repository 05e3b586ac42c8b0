mod memory;
mod postgres;

pub use memory::InMemoryShippingRepository;
pub use postgres::PostgresShippingRepository;
