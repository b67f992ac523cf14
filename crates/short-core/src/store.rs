pub mod memory;
pub mod timeout;

use crate::alias::Alias;
use crate::error::Result;
use crate::record::{NewUrl, UrlRecord};
use async_trait::async_trait;

/// A read-only view of a link store.
///
/// Resolution paths only need these operations, so they take a
/// `ReadLinkStore` rather than the full [`LinkStore`].
#[async_trait]
pub trait ReadLinkStore: Send + Sync + 'static {
    /// Checks whether a record with exactly this alias is persisted.
    ///
    /// Expired records still exist. A miss is `Ok(false)`, never an error.
    async fn exists_by_alias(&self, alias: &Alias) -> Result<bool>;

    /// Retrieves the record stored under `alias`.
    ///
    /// Returns `Err(NotFound)` when no record matches and `Err(Corrupt)` when
    /// the backend holds more than one row for the alias.
    async fn get_by_alias(&self, alias: &Alias) -> Result<UrlRecord>;
}

#[async_trait]
pub trait LinkStore: ReadLinkStore {
    /// Persists a new record.
    ///
    /// Returns `Err(AliasConflict)` if the alias is already taken. Uniqueness
    /// is enforced atomically by the backend, so exactly one of several
    /// concurrent creators for the same alias succeeds.
    async fn create(&self, url: NewUrl) -> Result<()>;
}
