use crate::error::AliasError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The primary identity of a stored URL.
///
/// Aliases are compared byte for byte: `"abc"` and `"ABC"` are different
/// aliases. A valid alias is non-empty, at most 64 characters, and contains no
/// whitespace, control characters or `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

pub const MAX_LENGTH: usize = 64;

impl Alias {
    /// Creates a new `Alias` after validating the input.
    pub fn new(alias: impl Into<String>) -> Result<Self, AliasError> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for values read back from a store or produced by a
    /// trusted source.
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the public short URL for this alias under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(alias: &str) -> Result<(), AliasError> {
        if alias.is_empty() {
            return Err(AliasError::Empty);
        }

        let len = alias.chars().count();
        if len > MAX_LENGTH {
            return Err(AliasError::TooLong {
                max: MAX_LENGTH,
                len,
            });
        }

        if let Some(c) = alias
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || *c == '/')
        {
            return Err(AliasError::InvalidCharacter(c));
        }

        Ok(())
    }
}

impl TryFrom<String> for Alias {
    type Error = AliasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
