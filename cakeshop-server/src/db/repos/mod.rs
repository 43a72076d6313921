//! Repository implementations for database access

pub mod cakes;

pub use cakes::CakeRepo;
