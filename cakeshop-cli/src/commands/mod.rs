//! Command implementations for the cakeshop CLI

pub mod serve;

pub use serve::run_serve;
