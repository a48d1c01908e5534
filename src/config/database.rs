use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Read the database settings; `None` when `DATABASE_URL` is unset
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(database_url) = env::var("DATABASE_URL") else {
            return Ok(None);
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        let connect_timeout_secs = env::var("DB_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("DB_CONNECT_TIMEOUT must be a number of seconds")?;

        Ok(Some(DatabaseConfig {
            database_url,
            max_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        }))
    }

    pub async fn create_pool(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect(&self.database_url)
            .await?;

        Ok(pool)
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
