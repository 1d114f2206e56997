//! Database connection pool management and the table-level client the
//! route layer depends on.

use anyhow::{Context, Result};
use axum::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;

/// Create a PostgreSQL connection pool with optimized settings
pub async fn create_pool(settings: &Settings) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&settings.database_url)
        .context("Invalid DATABASE_URL")?
        .application_name("swaps-backend");

    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    tracing::info!(
        max_connections = settings.database_max_connections,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Lightweight health check for database connectivity
pub async fn health_check(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}

/// Tables reachable through [`TableClient`]. Names are fixed here and never
/// taken from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Swaps,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swaps => "swaps",
        }
    }
}

/// Narrow query capability over named tables.
///
/// Row ids are opaque strings and are compared as text.
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Current `status` of the row, `None` when no row has this id.
    async fn fetch_status(&self, table: Table, id: &str) -> Result<Option<String>, sqlx::Error>;

    /// Move the row from status `from` to `to`. Returns the number of rows
    /// touched, so `0` means the row is gone or no longer in `from`.
    async fn update_status(
        &self,
        table: Table,
        id: &str,
        from: &str,
        to: &str,
    ) -> Result<u64, sqlx::Error>;
}

fn fetch_status_sql(table: Table) -> String {
    format!("SELECT status FROM {} WHERE id::text = $1", table.as_str())
}

/// Only `id` and `status` columns are assumed to exist.
fn update_status_sql(table: Table) -> String {
    format!(
        "UPDATE {} SET status = $1 WHERE id::text = $2 AND status = $3",
        table.as_str()
    )
}

#[async_trait]
impl TableClient for PgPool {
    async fn fetch_status(&self, table: Table, id: &str) -> Result<Option<String>, sqlx::Error> {
        let sql = fetch_status_sql(table);
        sqlx::query_scalar(&sql).bind(id).fetch_optional(self).await
    }

    async fn update_status(
        &self,
        table: Table,
        id: &str,
        from: &str,
        to: &str,
    ) -> Result<u64, sqlx::Error> {
        let sql = update_status_sql(table);
        let result = sqlx::query(&sql)
            .bind(to)
            .bind(id)
            .bind(from)
            .execute(self)
            .await?;
        Ok(result.rows_affected())
    }
}
