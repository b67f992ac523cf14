use crate::alias::Alias;
use crate::error::{Result, StoreError};
use crate::record::{NewUrl, UrlRecord};
use crate::store::{LinkStore, ReadLinkStore};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tracing::{trace, warn};

/// In-memory implementation of the link store using DashMap.
///
/// `create` goes through the map's entry API, which holds the shard lock for
/// the key between the occupancy check and the insert, so concurrent creators
/// of one alias cannot both win. Uniqueness only holds within one process;
/// use a SQL backend when several processes share the data.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryLinkStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadLinkStore for InMemoryLinkStore {
    async fn exists_by_alias(&self, alias: &Alias) -> Result<bool> {
        Ok(self.storage.contains_key(alias.as_str()))
    }

    async fn get_by_alias(&self, alias: &Alias) -> Result<UrlRecord> {
        self.storage
            .get(alias.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn create(&self, url: NewUrl) -> Result<()> {
        let record = url.into_record(Timestamp::now());

        match self.storage.entry(record.alias.as_str().to_owned()) {
            Entry::Occupied(_) => {
                warn!(alias = %record.alias, "alias already taken");
                Err(StoreError::AliasConflict(record.alias.to_string()))
            }
            Entry::Vacant(slot) => {
                trace!(alias = %record.alias, "storing url record");
                slot.insert(record);
                Ok(())
            }
        }
    }
}
