//! Storage backends for the repository ports.

mod memory;

pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresStore;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
