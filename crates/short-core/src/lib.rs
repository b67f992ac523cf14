//! Core types and traits for the short-link store.
//!
//! This crate defines the alias-keyed [`UrlRecord`], the [`LinkStore`]
//! contract every backend implements, and the creation/resolution services
//! that consume it. Durable backends live in `short_storage`.

pub mod alias;
pub mod creator;
pub mod error;
pub mod record;
pub mod resolver;
pub mod store;

pub use alias::Alias;
pub use creator::{CreateError, CreateParams, Creator, ExpirationPolicy};
pub use error::{AliasError, StoreError};
pub use record::{NewUrl, UrlRecord};
pub use resolver::{ResolveError, Resolver};
pub use store::memory::InMemoryLinkStore;
pub use store::timeout::TimeoutStore;
pub use store::{LinkStore, ReadLinkStore};
