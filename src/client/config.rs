//! Construction-time client configuration

use std::fmt;
use std::time::Duration;

use crate::cache::Ttl;

use super::endpoint::API_BASE_URL;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Immutable settings for a `RoyaleClient`
///
/// Built once with the `with_*` methods and handed to the client; nothing in
/// it changes after the client is constructed.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) token: String,
    pub(crate) timeout: Duration,
    pub(crate) proxy: Option<String>,
    pub(crate) verify_tls: bool,
    pub(crate) cache_ttl: Ttl,
    pub(crate) base_url: String,
}

impl ClientConfig {
    /// Creates a configuration for the given API token with default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            verify_tls: true,
            cache_ttl: Ttl::default(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Sets the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes all requests through the given proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enables or disables TLS certificate verification
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Sets how long fetched responses stay cached
    pub fn with_cache_ttl(mut self, ttl: Ttl) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Points the client at a different API root (for testing or mirrors)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn cache_ttl(&self) -> Ttl {
        self.cache_ttl
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `Authorization` header
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("verify_tls", &self.verify_tls)
            .field("cache_ttl", &self.cache_ttl)
            .field("base_url", &self.base_url)
            .finish()
    }
}
