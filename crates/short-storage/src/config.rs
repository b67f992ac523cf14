use std::fmt::{Display, Formatter};
use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(10);

/// The SQL engine behind a database URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    /// Picks the backend from the URL scheme.
    pub fn from_database_url(url: &str) -> Option<Self> {
        if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Some(Backend::MySql)
        } else if url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::MySql => write!(f, "mysql"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Connection settings for the SQL link stores.
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreConfig {
    #[builder(setter(into))]
    pub database_url: String,
    /// Upper bound on pooled connections.
    #[builder(default = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
    /// How long to wait for a free pooled connection.
    #[builder(default = DEFAULT_ACQUIRE_TIMEOUT)]
    pub acquire_timeout: Duration,
    /// Deadline applied to each store operation by `TimeoutStore`.
    #[builder(default = DEFAULT_OP_TIMEOUT)]
    pub op_timeout: Duration,
}

impl StoreConfig {
    pub fn backend(&self) -> Option<Backend> {
        Backend::from_database_url(&self.database_url)
    }
}
