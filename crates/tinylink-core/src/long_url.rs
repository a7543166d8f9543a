use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// A destination URL accepted for shortening.
///
/// A `LongUrl` is absolute and carries both a scheme and an authority
/// (`scheme://host...`). Surrounding whitespace is ignored while validating,
/// but the submitted text is kept verbatim so resolving returns exactly what
/// was shortened.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongUrl(String);

impl LongUrl {
    /// Validates `raw` and wraps it.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let submitted = raw.as_ref();
        let raw = submitted.trim();

        if raw.is_empty() {
            return Err(CoreError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let parsed = Url::parse(raw)
            .map_err(|e| CoreError::InvalidUrl(format!("{}: '{}'", e, raw)))?;

        // The parser repairs inputs such as `ftp:/host` into `ftp://host/`,
        // so the authority marker is checked on the raw text.
        let has_authority = raw
            .split_once(':')
            .is_some_and(|(_, rest)| rest.starts_with("//"));

        if !has_authority || !parsed.has_host() {
            return Err(CoreError::InvalidUrl(format!(
                "URL must have a scheme and an authority: '{}'",
                raw
            )));
        }

        Ok(Self(submitted.to_string()))
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for LongUrl {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LongUrl> for String {
    fn from(value: LongUrl) -> Self {
        value.0
    }
}

impl Display for LongUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(LongUrl::parse("https://example.com/path?q=1").is_ok());
        assert!(LongUrl::parse("http://localhost:8080").is_ok());
        assert!(LongUrl::parse("https://witek.com.br").is_ok());
        assert!(LongUrl::parse("ftp://files.example.com/pub").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            LongUrl::parse(""),
            Err(CoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            LongUrl::parse("   "),
            Err(CoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_non_urls() {
        assert!(LongUrl::parse("not a url").is_err());
        assert!(LongUrl::parse("example.com/path").is_err());
        assert!(LongUrl::parse("https://").is_err());
    }

    #[test]
    fn rejects_missing_authority() {
        assert!(LongUrl::parse("ftp:/malformed").is_err());
        assert!(LongUrl::parse("mailto:someone@example.com").is_err());
        assert!(LongUrl::parse("javascript:alert(1)").is_err());
    }

    #[test]
    fn keeps_submitted_text() {
        let url = LongUrl::parse("https://Example.com/A?b=C").unwrap();
        assert_eq!(url.as_str(), "https://Example.com/A?b=C");
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let url = LongUrl::parse(" https://example.com/x\n").unwrap();
        assert_eq!(url.as_str(), " https://example.com/x\n");
        assert_eq!(url.into_string(), " https://example.com/x\n");
    }
}
