use tinylink_core::ExpiryPolicy;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Settings for the create flow.
///
/// ```rust
/// use tinylink_shortener::ShortenerConfig;
///
/// let config = ShortenerConfig::builder()
///     .base_url("https://short.witek.com.br/t/")
///     .build();
/// assert_eq!(config.max_attempts(), 5);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerConfig {
    /// Prefix joined with the id to form the short URL.
    #[builder(setter(into))]
    base_url: String,
    #[builder(default)]
    expiry: ExpiryPolicy,
    /// Total write attempts per create, the first one included.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

impl ShortenerConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn expiry(&self) -> &ExpiryPolicy {
        &self.expiry
    }

    /// Never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
