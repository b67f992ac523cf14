use std::sync::Arc;

use crate::alias::Alias;
use crate::error::StoreError;
use crate::record::UrlRecord;
use crate::store::ReadLinkStore;
use jiff::Timestamp;
use thiserror::Error;
use tracing::{debug, error, trace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("alias expired at {expire_at}: {alias}")]
    Expired { alias: String, expire_at: Timestamp },
    #[error("link store failed: {0}")]
    Store(#[source] StoreError),
}

impl ResolveError {
    /// Whether callers should answer with a plain "not found".
    ///
    /// Expired links are indistinguishable from missing ones to clients.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound(_) | ResolveError::Expired { .. })
    }
}

impl From<StoreError> for ResolveError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(alias) => ResolveError::NotFound(alias),
            other => ResolveError::Store(other),
        }
    }
}

/// Service for resolving aliases to their original URLs.
///
/// Uses a read-only store to fetch records and enforces expiration; the store
/// itself returns expired records unchanged.
#[derive(Debug)]
pub struct Resolver<R> {
    store: Arc<R>,
}

impl<R> Clone for Resolver<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: ReadLinkStore> Resolver<R> {
    /// Creates a new Resolver over the given store.
    pub fn new(store: R) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a Resolver sharing a store with other consumers.
    pub fn from_shared(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Resolves an alias to its live record using the current time.
    ///
    /// # Returns
    ///
    /// * `Ok(record)` - The record if it exists and has not expired
    /// * `Err(NotFound)` / `Err(Expired)` - Map to a client-visible not found
    /// * `Err(Store(e))` - The store failed
    pub async fn resolve(&self, alias: &Alias) -> Result<UrlRecord, ResolveError> {
        self.resolve_at(alias, Timestamp::now()).await
    }

    /// Resolves an alias as of `now`.
    pub async fn resolve_at(
        &self,
        alias: &Alias,
        now: Timestamp,
    ) -> Result<UrlRecord, ResolveError> {
        trace!(%alias, "resolving alias");

        let record = match self.store.get_by_alias(alias).await {
            Ok(record) => record,
            Err(StoreError::Corrupt(message)) => {
                error!(%alias, %message, "link store holds corrupt data");
                return Err(ResolveError::Store(StoreError::Corrupt(message)));
            }
            Err(other) => {
                trace!(%alias, error = %other, "alias not resolved");
                return Err(other.into());
            }
        };

        if record.is_expired_at(now) {
            debug!(%alias, expire_at = %record.expire_at, "record has expired");
            return Err(ResolveError::Expired {
                alias: alias.to_string(),
                expire_at: record.expire_at,
            });
        }

        debug!(%alias, url = %record.original_url, "resolved alias");
        Ok(record)
    }
}
