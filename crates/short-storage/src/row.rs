//! Row shape shared by the SQL backends.
//!
//! Timestamps are stored as Unix seconds in `BIGINT`/`INTEGER` columns.

use jiff::Timestamp;
use short_core::{Alias, StoreError, UrlRecord};
use tracing::error;

pub(crate) const SELECT_BY_ALIAS: &str = r#"
    SELECT original_url, expire_at, created_at, updated_at
    FROM url
    WHERE alias = ?
    LIMIT 2
"#;

pub(crate) const SELECT_EXISTS: &str = r#"
    SELECT 1
    FROM url
    WHERE alias = ?
    LIMIT 1
"#;

pub(crate) const INSERT: &str = r#"
    INSERT INTO url (alias, original_url, expire_at, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?)
"#;

/// A `url` table row as the driver decodes it.
///
/// The alias column is not read back; the caller already holds the exact
/// value it matched on.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UrlRow {
    pub original_url: String,
    pub expire_at: i64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Column values for an insert.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InsertValues {
    pub expire_at: i64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl From<&UrlRecord> for InsertValues {
    fn from(record: &UrlRecord) -> Self {
        Self {
            expire_at: record.expire_at.as_second(),
            created_at: record.created_at.as_second(),
            updated_at: record.updated_at.map(|ts| ts.as_second()),
        }
    }
}

fn parse_timestamp(column: &str, alias: &Alias, seconds: i64) -> Result<Timestamp, StoreError> {
    Timestamp::from_second(seconds).map_err(|e| {
        StoreError::Corrupt(format!(
            "invalid {column} timestamp '{seconds}' for alias '{alias}': {e}"
        ))
    })
}

impl UrlRow {
    fn into_record(self, alias: &Alias) -> Result<UrlRecord, StoreError> {
        let expire_at = parse_timestamp("expire_at", alias, self.expire_at)?;
        let created_at = parse_timestamp("created_at", alias, self.created_at)?;
        let updated_at = self
            .updated_at
            .map(|seconds| parse_timestamp("updated_at", alias, seconds))
            .transpose()?;

        Ok(UrlRecord {
            alias: alias.clone(),
            original_url: self.original_url,
            expire_at,
            created_at,
            updated_at,
        })
    }
}

/// Picks the only row for `alias` out of a `LIMIT 2` lookup.
pub(crate) fn single_record(alias: &Alias, rows: Vec<UrlRow>) -> Result<UrlRecord, StoreError> {
    let mut rows = rows.into_iter();
    let Some(row) = rows.next() else {
        return Err(StoreError::NotFound(alias.to_string()));
    };

    if rows.next().is_some() {
        error!(%alias, "multiple rows stored for one alias, uniqueness is broken");
        return Err(StoreError::Corrupt(format!(
            "more than one row stored for alias '{alias}'"
        )));
    }

    row.into_record(alias).inspect_err(|e| error!(%alias, error = %e, "undecodable url row"))
}
