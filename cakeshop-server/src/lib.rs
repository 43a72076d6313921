//! cakeshop-server: HTTP CRUD service over the `cakes` table
//!
//! Five handlers, one SQL statement each. The storage handle is built once at
//! startup and injected into the router as [`AppState`].

pub mod db;
pub mod http;
pub mod models;

pub use db::{CakeRepo, CakeStore, DbConfig, DbError, MemoryCakeStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Cake, CakeInput};
