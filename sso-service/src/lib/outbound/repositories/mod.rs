pub mod memory;
pub mod postgres;

pub use memory::InMemoryAppStore;
pub use memory::InMemoryUserStore;
pub use postgres::PostgresAppStore;
pub use postgres::PostgresUserStore;
