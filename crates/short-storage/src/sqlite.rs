use std::str::FromStr;

use async_trait::async_trait;
use jiff::Timestamp;
use short_core::error::Result;
use short_core::{Alias, LinkStore, NewUrl, ReadLinkStore, UrlRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, trace, warn};

use crate::config::StoreConfig;
use crate::error::{map_insert_error, map_sqlx_error};
use crate::row::{self, InsertValues, UrlRow};

const SCHEMA: &str = include_str!("../ddl/sqlite/url.sql");

/// SQLite implementation of the link store contract.
///
/// Same table layout and semantics as the MySQL store; the `UNIQUE`
/// constraint on `alias` rejects duplicates. SQLite compares text with the
/// `BINARY` collation by default, so alias matching is exact.
#[derive(Debug, Clone)]
pub struct SqliteLinkStore {
    pool: SqlitePool,
}

impl SqliteLinkStore {
    /// Creates a store from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new SQLite connection pool.
    ///
    /// The database file is created if it does not exist.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        debug!(max_connections = config.max_connections, "opened sqlite database");
        Ok(Self::new(pool))
    }

    /// Creates the `url` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReadLinkStore for SqliteLinkStore {
    async fn exists_by_alias(&self, alias: &Alias) -> Result<bool> {
        let exists = sqlx::query(row::SELECT_EXISTS)
            .bind(alias.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .is_some();

        trace!(%alias, exists, "checked alias");
        Ok(exists)
    }

    async fn get_by_alias(&self, alias: &Alias) -> Result<UrlRecord> {
        let rows: Vec<UrlRow> = sqlx::query_as(row::SELECT_BY_ALIAS)
            .bind(alias.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row::single_record(alias, rows)
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn create(&self, url: NewUrl) -> Result<()> {
        let record = url.into_record(Timestamp::now());
        let values = InsertValues::from(&record);

        sqlx::query(row::INSERT)
            .bind(record.alias.as_str())
            .bind(record.original_url.as_str())
            .bind(values.expire_at)
            .bind(values.created_at)
            .bind(values.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|err| map_insert_error(record.alias.as_str(), err))
            .inspect_err(|e| warn!(alias = %record.alias, error = %e, "insert rejected"))?;

        trace!(alias = %record.alias, "stored url record");
        Ok(())
    }
}
