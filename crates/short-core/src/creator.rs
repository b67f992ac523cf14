use std::sync::Arc;

use crate::alias::Alias;
use crate::error::StoreError;
use crate::record::{NewUrl, UrlRecord};
use crate::store::LinkStore;
use jiff::{SignedDuration, Timestamp};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    #[error("alias already taken: {0}")]
    AliasTaken(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),
    #[error("link store failed: {0}")]
    Store(#[source] StoreError),
}

impl CreateError {
    /// Whether the failure is caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CreateError::Store(_))
    }
}

impl From<StoreError> for CreateError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AliasConflict(alias) => CreateError::AliasTaken(alias),
            other => CreateError::Store(other),
        }
    }
}

/// When a new short link stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    /// The link expires after a duration from the time of creation.
    AfterDuration(SignedDuration),
    /// The link expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

impl ExpirationPolicy {
    fn expire_at(self, now: Timestamp) -> Result<Timestamp, CreateError> {
        match self {
            ExpirationPolicy::AtTimestamp(timestamp) => Ok(timestamp),
            ExpirationPolicy::AfterDuration(duration) => now
                .checked_add(duration)
                .map_err(|e| CreateError::InvalidExpiration(e.to_string())),
        }
    }
}

/// Parameters for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub alias: Alias,
    pub original_url: String,
    pub expiration: ExpirationPolicy,
}

/// Service for creating short links.
///
/// Validates the request, then hands the record to the store. The optional
/// existence probe only saves a write for aliases that are obviously taken;
/// the store's own uniqueness check decides every race.
#[derive(Debug)]
pub struct Creator<S> {
    store: Arc<S>,
    precheck: bool,
}

impl<S> Clone for Creator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            precheck: self.precheck,
        }
    }
}

impl<S: LinkStore> Creator<S> {
    /// Creates a new Creator over the given store.
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a Creator sharing a store with other consumers.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self {
            store,
            precheck: true,
        }
    }

    /// Enables or disables the existence probe before inserting.
    pub fn with_precheck(mut self, precheck: bool) -> Self {
        self.precheck = precheck;
        self
    }

    /// Validates that the URL has an http(s) scheme and a host.
    fn validate_url(url: &str) -> Result<(), CreateError> {
        if url.is_empty() {
            return Err(CreateError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(CreateError::InvalidUrl(format!(
                "URL must have a scheme and host: {url}"
            )));
        };

        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(CreateError::InvalidUrl(format!(
                "URL scheme must be http or https: {scheme}"
            )));
        }

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(CreateError::InvalidUrl(format!("URL has no host: {url}")));
        }

        Ok(())
    }

    /// Creates a short link and returns the record as persisted.
    pub async fn create(&self, params: CreateParams) -> Result<UrlRecord, CreateError> {
        self.create_at(params, Timestamp::now()).await
    }

    /// Creates a short link as of `now`.
    pub async fn create_at(
        &self,
        params: CreateParams,
        now: Timestamp,
    ) -> Result<UrlRecord, CreateError> {
        Self::validate_url(&params.original_url)?;
        let expire_at = params.expiration.expire_at(now)?;

        if self.precheck && self.store.exists_by_alias(&params.alias).await? {
            debug!(alias = %params.alias, "alias taken, skipping insert");
            return Err(CreateError::AliasTaken(params.alias.to_string()));
        }

        let url = NewUrl::builder()
            .alias(params.alias)
            .original_url(params.original_url)
            .expire_at(expire_at)
            .created_at(now)
            .build();
        let record = url.clone().into_record(now);

        self.store.create(url).await?;

        info!(alias = %record.alias, expire_at = %record.expire_at, "short link created");
        Ok(record)
    }
}
