//! Cake repository backed by PostgreSQL
//!
//! One parameterized statement per operation:
//! - list: full scan ordered by rating, title
//! - update: leaves `updated_at` to the database
//! - delete: hard delete, `deleted_at` is never written

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::pool;
use crate::db::store::{cake_not_found, CakeStore, DbError};
use crate::models::{Cake, CakeInput};

/// Cake repository
#[derive(Clone)]
pub struct CakeRepo {
    pool: PgPool,
}

impl CakeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CakeStore for CakeRepo {
    async fn list(&self) -> Result<Vec<Cake>, DbError> {
        let cakes = sqlx::query_as::<_, Cake>(
            r#"
            SELECT id, title, description, rating, image, created_at, updated_at, deleted_at
            FROM cakes
            ORDER BY rating DESC, title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cakes)
    }

    async fn get(&self, id: i64) -> Result<Cake, DbError> {
        sqlx::query_as::<_, Cake>(
            r#"
            SELECT id, title, description, rating, image, created_at, updated_at, deleted_at
            FROM cakes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| cake_not_found(id))
    }

    async fn create(&self, input: &CakeInput) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO cakes (title, description, rating, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.rating)
        .bind(&input.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, id: i64, input: &CakeInput) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE cakes
            SET title = $1, description = $2, rating = $3, image = $4
            WHERE id = $5
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.rating)
        .bind(&input.image)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM cakes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DbError> {
        pool::ping(&self.pool).await?;
        Ok(())
    }
}
