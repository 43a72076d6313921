//! Storage abstraction injected into the HTTP handlers

use async_trait::async_trait;

use crate::models::{Cake, CakeInput};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Raw driver failure. Displays the driver message unchanged.
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Operations over the `cakes` table.
///
/// Each method maps to exactly one statement. `update` and `delete` report the
/// number of rows affected; callers decide whether zero matters.
#[async_trait]
pub trait CakeStore: Send + Sync {
    /// All cakes, rating descending then title ascending.
    async fn list(&self) -> Result<Vec<Cake>, DbError>;

    /// A single cake, or `DbError::NotFound`.
    async fn get(&self, id: i64) -> Result<Cake, DbError>;

    /// Insert a cake and return the id assigned by the store.
    async fn create(&self, input: &CakeInput) -> Result<i64, DbError>;

    /// Overwrite the mutable fields of a cake.
    async fn update(&self, id: i64, input: &CakeInput) -> Result<u64, DbError>;

    /// Remove the row outright.
    async fn delete(&self, id: i64) -> Result<u64, DbError>;

    /// Round trip to the backing store.
    async fn ping(&self) -> Result<(), DbError>;
}

pub(crate) fn cake_not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "Cake",
        id: id.to_string(),
    }
}
