use crate::alias::Alias;
use crate::error::{Result, StoreError};
use crate::record::{NewUrl, UrlRecord};
use crate::store::{LinkStore, ReadLinkStore};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A link store decorator that bounds every operation by a deadline.
///
/// An operation that does not finish in time is dropped, which cancels the
/// underlying query, and reported as [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutStore<S> {
    /// Wraps `inner` so that each operation fails after `timeout`.
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Returns a reference to the inner store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        alias: &Alias,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%alias, operation, timeout = ?self.timeout, "link store operation timed out");
                Err(StoreError::Unavailable(format!(
                    "{operation} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<S: ReadLinkStore> ReadLinkStore for TimeoutStore<S> {
    async fn exists_by_alias(&self, alias: &Alias) -> Result<bool> {
        self.bounded("exists_by_alias", alias, self.inner.exists_by_alias(alias))
            .await
    }

    async fn get_by_alias(&self, alias: &Alias) -> Result<UrlRecord> {
        self.bounded("get_by_alias", alias, self.inner.get_by_alias(alias))
            .await
    }
}

#[async_trait]
impl<S: LinkStore> LinkStore for TimeoutStore<S> {
    async fn create(&self, url: NewUrl) -> Result<()> {
        let alias = url.alias.clone();
        self.bounded("create", &alias, self.inner.create(url)).await
    }
}
