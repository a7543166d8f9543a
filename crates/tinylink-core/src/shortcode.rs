use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated identifier for a shortened URL.
///
/// Ids are 1-64 characters long and contain only ASCII alphanumerics,
/// hyphens or underscores, which keeps them safe inside a URL path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortId(String);

pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 64;

impl ShortId {
    /// Creates a new `ShortId` after validating the input.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `ShortId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), CoreError> {
        if id.len() < MIN_LENGTH || id.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortId(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidShortId(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortId> for String {
    fn from(value: ShortId) -> Self {
        value.0
    }
}

impl AsRef<str> for ShortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
