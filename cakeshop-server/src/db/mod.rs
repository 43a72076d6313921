//! Storage layer - connection pool and cake stores
//!
//! Every operation is a single autocommitted statement. No explicit
//! transactions, retries, or locking; concurrent writers get whatever
//! isolation the database provides by default.

pub mod memory;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryCakeStore;
pub use pool::{create_pool, create_pool_with_options, DbConfig};
pub use repos::CakeRepo;
pub use store::{CakeStore, DbError};
