//! HTTP server command
//!
//! Opens the storage handle once, then serves until shutdown. Failing to
//! reach the database is fatal: the listener is never bound.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use cakeshop_server::db::{create_pool_with_options, DbConfig};
use cakeshop_server::{run_server, AppState, CakeRepo, MemoryCakeStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CAKESHOP_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides the individual --db-* parameters)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "CAKESHOP_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "CAKESHOP_DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "CAKESHOP_DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "CAKESHOP_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "CAKESHOP_DB_NAME", default_value = "cake_store")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Keep cakes in memory instead of PostgreSQL (data is lost on exit).
    /// Takes precedence over any database settings.
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            username: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            max_connections: self.max_connections,
            ..DbConfig::default()
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.memory {
        tracing::warn!("Serving from memory; nothing is persisted");
        if args.database_url.is_some() {
            tracing::warn!("--memory set, ignoring DATABASE_URL");
        }
        AppState::from_store(MemoryCakeStore::new())
    } else {
        let pool = match &args.database_url {
            Some(url) => create_pool_with_options(url, args.max_connections).await,
            None => {
                let db = args.db_config();
                tracing::info!(host = %db.host, port = db.port, database = %db.database, "Connecting to database");
                db.connect().await
            }
        }
        .context("Failed to connect to database")?;

        AppState::from_store(CakeRepo::new(pool))
    };

    tracing::info!("Starting cakeshop on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(state, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_setup() {
        let args = ServeArgs::try_parse_from(["serve"]).unwrap();
        assert_eq!(args.bind.port(), 8000);
        assert!(!args.memory);

        let db = args.db_config();
        assert_eq!(db.host, "localhost");
        assert_eq!(db.port, 5432);
        assert_eq!(db.database, "cake_store");
        assert_eq!(db.max_connections, 5);
    }

    #[test]
    fn memory_wins_over_database_url_from_env() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/cake_store");
        let args = ServeArgs::try_parse_from(["serve", "--memory"]).unwrap();
        std::env::remove_var("DATABASE_URL");

        assert!(args.memory);
        assert_eq!(
            args.database_url.as_deref(),
            Some("postgres://localhost/cake_store")
        );
    }

    #[test]
    fn memory_accepts_explicit_database_url() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--memory",
            "--database-url",
            "postgres://localhost/cake_store",
        ])
        .unwrap();
        assert!(args.memory);
    }
}
