//! Durable SQL backends for the short-link store.
//!
//! Both backends share one table layout (`ddl/`) and one error mapping, and
//! rely on the database's uniqueness constraint on `alias` to reject
//! duplicate creates atomically.

pub mod config;
mod error;
pub mod mysql;
mod row;
pub mod sqlite;

pub use config::{Backend, StoreConfig};
pub use mysql::MySqlLinkStore;
pub use short_core::{Alias, LinkStore, NewUrl, ReadLinkStore, StoreError, TimeoutStore, UrlRecord};
pub use sqlite::SqliteLinkStore;
