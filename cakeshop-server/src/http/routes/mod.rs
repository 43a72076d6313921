//! Route handlers organized by resource

pub mod cakes;
pub mod health;
