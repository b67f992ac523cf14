use thiserror::Error;

/// Result type for link store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced across the [`LinkStore`](crate::LinkStore) boundary.
///
/// Backends map every native failure into one of these kinds; raw driver
/// errors never cross the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no url found for alias: {0}")]
    NotFound(String),
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("link store unavailable: {0}")]
    Unavailable(String),
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("alias cannot be empty")]
    Empty,
    #[error("alias length must be at most {max}, got {len}")]
    TooLong { max: usize, len: usize },
    #[error("alias contains an invalid character {0:?}")]
    InvalidCharacter(char),
}
