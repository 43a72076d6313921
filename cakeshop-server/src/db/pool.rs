//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is opened once
//! at startup and verified with a round trip before the server binds.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long startup waits for the first connection (sqlx's own default).
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Individual connection parameters for the cake database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: "cake_store".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl DbConfig {
    /// Build driver connect options. The password is passed through as-is,
    /// so no URL escaping is needed.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// Open a pool from these parameters and verify the server answers.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        connect_with(
            self.connect_options(),
            self.max_connections,
            self.acquire_timeout,
        )
        .await
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection or the initial ping fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/cake_store").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?;
    connect_with(options, max_connections, DEFAULT_ACQUIRE_TIMEOUT).await
}

/// Build the pool and ping it once.
async fn connect_with(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;
    ping(&pool).await?;
    Ok(pool)
}

pub(crate) async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
