//! In-process cake store
//!
//! Mirrors the observable behavior of [`CakeRepo`](super::CakeRepo): ids are
//! assigned monotonically and never reused, update leaves `updated_at`
//! untouched, delete removes the entry. Used to serve without a database and
//! as the store behind the router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::{cake_not_found, CakeStore, DbError};
use crate::models::{Cake, CakeInput};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Cake>,
}

/// Cake store held in memory
#[derive(Default)]
pub struct MemoryCakeStore {
    table: RwLock<Table>,
    closed: AtomicBool,
}

impl MemoryCakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cakes.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Make every subsequent call fail the way a closed pool does.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn check_open(&self) -> Result<(), DbError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl CakeStore for MemoryCakeStore {
    async fn list(&self) -> Result<Vec<Cake>, DbError> {
        self.check_open()?;
        let table = self.table.read().await;
        let mut cakes: Vec<Cake> = table.rows.values().cloned().collect();
        cakes.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(cakes)
    }

    async fn get(&self, id: i64) -> Result<Cake, DbError> {
        self.check_open()?;
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| cake_not_found(id))
    }

    async fn create(&self, input: &CakeInput) -> Result<i64, DbError> {
        self.check_open()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let now = Utc::now();
        table.rows.insert(
            id,
            Cake {
                id,
                title: input.title.clone(),
                description: input.description.clone(),
                rating: input.rating,
                image: input.image.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, input: &CakeInput) -> Result<u64, DbError> {
        self.check_open()?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(cake) => {
                cake.title = input.title.clone();
                cake.description = input.description.clone();
                cake.rating = input.rating;
                cake.image = input.image.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        self.check_open()?;
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check_open()
    }
}
